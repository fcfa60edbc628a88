/*
 * Styled character word layout
 * bits  0 →  6   ASCII character
 * bit        7   reserved, always 0
 * bits  8 → 12   foreground color index
 * bits 13 → 17   background color index
 * bits 18 → 25   style flags
 * bits 26 → 31   reserved
 */
use bitflags::bitflags;
use sparsemem_lib::Word;

/// Highest valid color index, 17 to 31 are not colors.
pub const MAX_COLOR_INDEX: u8 = 16;

const ASCII_MASK: Word = 0x7f;
const COLOR_MASK: Word = 0x1f;
const FOREGROUND_SHIFT: u32 = 8;
const BACKGROUND_SHIFT: u32 = 13;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StyleFlags: u32 {
        const BOLD = 1 << 18;
        const FAINT = 1 << 19;
        const ITALIC = 1 << 20;
        const UNDERLINE = 1 << 21;
        const BLINK = 1 << 22;
        const HIDE = 1 << 23;
        const CROSSED = 1 << 24;
        const OVERLINE = 1 << 25;
    }
}

// Select Graphic Rendition parameter of each style, in emission order.
// Blinking is the slow one, the fast one is not widely supported.
const STYLE_SGR: [(StyleFlags, u8); 8] = [
    (StyleFlags::BOLD, 1),
    (StyleFlags::FAINT, 2),
    (StyleFlags::ITALIC, 3),
    (StyleFlags::UNDERLINE, 4),
    (StyleFlags::BLINK, 5),
    (StyleFlags::HIDE, 8),
    (StyleFlags::CROSSED, 9),
    (StyleFlags::OVERLINE, 53),
];

impl StyleFlags {
    /// SGR parameters of every set flag.
    pub fn sgr_codes(self) -> impl Iterator<Item = u8> {
        STYLE_SGR
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, code)| code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Terminal default.
    Default,
    /// One of the 8 standard colors, 0 is black.
    Standard(u8),
    /// Bright variant of a standard color.
    Bright(u8),
}

impl Color {
    /// Index 0 is the default color, 1 → 8 the standard colors and 9 → 16
    /// their bright variants.
    pub fn from_index(index: u8) -> Color {
        debug_assert!(index <= MAX_COLOR_INDEX, "invalid color index {}", index);
        match index {
            1..=8 => Color::Standard(index - 1),
            9..=16 => Color::Bright(index - 9),
            _ => Color::Default,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Color::Default => 0,
            Color::Standard(color) => color + 1,
            Color::Bright(color) => color + 9,
        }
    }

    pub fn foreground_sgr(self) -> u8 {
        match self {
            Color::Default => 39,
            Color::Standard(color) => 30 + color,
            Color::Bright(color) => 90 + color,
        }
    }

    pub fn background_sgr(self) -> u8 {
        match self {
            Color::Default => 49,
            Color::Standard(color) => 40 + color,
            Color::Bright(color) => 100 + color,
        }
    }
}

/// A RAM word seen as a character cell of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledChar(Word);

impl From<Word> for StyledChar {
    fn from(word: Word) -> Self {
        StyledChar(word)
    }
}

impl From<StyledChar> for Word {
    fn from(styled_char: StyledChar) -> Self {
        styled_char.0
    }
}

impl StyledChar {
    pub fn new(ascii: u8, foreground: Color, background: Color, style: StyleFlags) -> Self {
        debug_assert!(ascii.is_ascii());
        StyledChar(
            (ascii as Word & ASCII_MASK)
                | (foreground.index() as Word) << FOREGROUND_SHIFT
                | (background.index() as Word) << BACKGROUND_SHIFT
                | style.bits(),
        )
    }

    pub fn ascii(self) -> u8 {
        (self.0 & ASCII_MASK) as u8
    }

    pub fn foreground(self) -> Color {
        Color::from_index(((self.0 >> FOREGROUND_SHIFT) & COLOR_MASK) as u8)
    }

    pub fn background(self) -> Color {
        Color::from_index(((self.0 >> BACKGROUND_SHIFT) & COLOR_MASK) as u8)
    }

    pub fn style(self) -> StyleFlags {
        StyleFlags::from_bits_truncate(self.0)
    }

    /// No bit set besides the character itself.
    pub fn is_plain(self) -> bool {
        self.0 & !ASCII_MASK == 0
    }
}
