use crate::{ScreenConfig, StyledChar};
use crossterm::{cursor, queue, terminal};
use sparsemem_lib::{Addr, Ram, Word, WriteListener};
use std::cell::RefCell;
use std::io::{self, Stdout, Write};
use std::rc::Rc;
use tracing::warn;

const CSI: &str = "\x1b[";

/// Character display drawing in a terminal through ANSI escape sequences.
#[derive(Debug)]
pub struct Screen<T>
where
    T: Write,
{
    output: T,
    config: ScreenConfig,
}

impl Screen<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), ScreenConfig::default())
    }
}

impl<T> Screen<T>
where
    T: Write,
{
    pub fn new(output: T, config: ScreenConfig) -> Self {
        Self { output, config }
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &T {
        &self.output
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.output
    }

    pub fn into_inner(self) -> T {
        self.output
    }

    /// Hides the cursor, clears the terminal and parks the cursor under the
    /// screen area.
    pub fn init(&mut self) -> io::Result<()> {
        queue!(
            self.output,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, self.config.height)
        )?;
        self.output.flush()
    }

    /// Restores the cursor.
    pub fn terminate(&mut self) -> io::Result<()> {
        queue!(self.output, cursor::Show)?;
        self.output.flush()
    }

    /// Draws `styled_char` in the cell of column `x` and line `y`, the
    /// cursor position is left unchanged.
    pub fn put_character(&mut self, x: u16, y: u16, styled_char: StyledChar) -> io::Result<()> {
        debug_assert!(x < self.config.width, "column {} out of the screen", x);
        debug_assert!(y < self.config.height, "line {} out of the screen", y);

        write!(self.output, "{CSI}s")?;
        queue!(self.output, cursor::MoveTo(x, y))?;
        #[cfg(feature = "styling")]
        if !styled_char.is_plain() {
            self.write_style(styled_char)?;
        }
        self.output.write_all(&[styled_char.ascii()])?;
        #[cfg(feature = "styling")]
        if !styled_char.is_plain() {
            write!(self.output, "{CSI}0m")?;
        }
        write!(self.output, "{CSI}u")?;

        self.output.flush()
    }

    /// Draws the word written at `addr`, which has to be in the RAM range
    /// mapped to the screen.
    pub fn ram_write(&mut self, addr: Addr, new_word: Word) -> io::Result<()> {
        debug_assert!(
            self.config.contains(addr),
            "address #0x{:08X} is not mapped to the screen",
            addr
        );
        let (x, y) = self.config.position(addr);

        self.put_character(x, y, StyledChar::from(new_word))
    }

    #[cfg(feature = "styling")]
    fn write_style(&mut self, styled_char: StyledChar) -> io::Result<()> {
        write!(
            self.output,
            "{CSI}0;{};{}",
            styled_char.foreground().foreground_sgr(),
            styled_char.background().background_sgr()
        )?;
        for code in styled_char.style().sgr_codes() {
            write!(self.output, ";{code}")?;
        }

        self.output.write_all(b"m")
    }
}

impl<T> Screen<T>
where
    T: Write + 'static,
{
    /// Initializes the screen and attaches it to the RAM, each write in the
    /// mapped range is drawn.
    pub fn init_with_ram_mapping(screen: &Rc<RefCell<Self>>, ram: &mut Ram) -> io::Result<()> {
        let (first, last) = {
            let mut screen = screen.borrow_mut();
            let range = screen.config.range();
            screen.init()?;
            range
        };
        ram.install_write_listener(first, last, Rc::clone(screen));

        Ok(())
    }
}

impl<T> WriteListener for Screen<T>
where
    T: Write,
{
    fn on_write(&mut self, addr: Addr, value: Word) {
        if let Err(e) = self.ram_write(addr, value) {
            warn!(addr, error = %e, "could not update the screen");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, StyleFlags};

    fn screen() -> Screen<Vec<u8>> {
        Screen::new(Vec::new(), ScreenConfig::default())
    }

    fn output(screen: Screen<Vec<u8>>) -> String {
        String::from_utf8(screen.into_inner()).unwrap()
    }

    #[test]
    fn test_init_and_terminate() {
        let mut screen = screen();
        screen.init().unwrap();
        screen.terminate().unwrap();
        assert_eq!("\x1b[?25l\x1b[2J\x1b[17;1H\x1b[?25h", output(screen));
    }

    #[test]
    fn test_plain_character() {
        let mut screen = screen();
        screen.put_character(3, 2, StyledChar::from(0x41_u32)).unwrap();
        assert_eq!("\x1b[s\x1b[3;4HA\x1b[u", output(screen));
    }

    #[cfg(feature = "styling")]
    #[test]
    fn test_styled_character() {
        let mut screen = screen();
        let styled_char = StyledChar::new(
            b'A',
            Color::Standard(1),
            Color::Bright(1),
            StyleFlags::BOLD | StyleFlags::UNDERLINE,
        );
        screen.put_character(0, 0, styled_char).unwrap();
        assert_eq!(
            "\x1b[s\x1b[1;1H\x1b[0;31;101;1;4mA\x1b[0m\x1b[u",
            output(screen)
        );
    }

    #[cfg(feature = "styling")]
    #[test]
    fn test_colors_only() {
        let mut screen = screen();
        let styled_char = StyledChar::new(b'#', Color::Bright(7), Color::Standard(0), StyleFlags::empty());
        screen.put_character(63, 15, styled_char).unwrap();
        assert_eq!("\x1b[s\x1b[16;64H\x1b[0;97;40m#\x1b[0m\x1b[u", output(screen));
    }

    #[cfg(feature = "styling")]
    #[test]
    fn test_style_without_color() {
        let mut screen = screen();
        let styled_char = StyledChar::new(b'x', Color::Default, Color::Default, StyleFlags::OVERLINE);
        screen.put_character(1, 0, styled_char).unwrap();
        assert_eq!("\x1b[s\x1b[1;2H\x1b[0;39;49;53mx\x1b[0m\x1b[u", output(screen));
    }

    #[cfg(not(feature = "styling"))]
    #[test]
    fn test_styling_disabled() {
        let mut screen = screen();
        let styled_char = StyledChar::new(b'A', Color::Standard(1), Color::Default, StyleFlags::BOLD);
        screen.put_character(0, 0, styled_char).unwrap();
        assert_eq!("\x1b[s\x1b[1;1HA\x1b[u", output(screen));
    }

    #[test]
    fn test_ram_write_position() {
        let mut screen = Screen::new(
            Vec::new(),
            ScreenConfig {
                base: 0x1000,
                ..ScreenConfig::default()
            },
        );
        screen.ram_write(0x1000 + 64 * 2 + 5, 0x62).unwrap();
        assert_eq!("\x1b[s\x1b[3;6Hb\x1b[u", output(screen));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_put_character_out_of_screen() {
        let mut screen = screen();
        let _ = screen.put_character(64, 0, StyledChar::from(0x41_u32));
    }
}
