/*
 * Terminal character display
 *
 * A region of RAM is attached to the screen, each write in this region
 * draws the written styled character at the matching cell of the terminal.
 */
mod config;
mod screen;
mod styled_char;

pub use config::{ScreenConfig, SCREEN_BASE_ADDR, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use screen::Screen;
pub use styled_char::{Color, StyleFlags, StyledChar, MAX_COLOR_INDEX};
