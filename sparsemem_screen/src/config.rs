use sparsemem_lib::Addr;

// Keep the dimensions powers of two, offsets then split with cheap masks.
/// Count of columns.
pub const SCREEN_WIDTH: u16 = 64;
/// Count of lines.
pub const SCREEN_HEIGHT: u16 = 16;
/// First RAM address mapped to the screen.
pub const SCREEN_BASE_ADDR: Addr = 0;

/// Geometry of the screen and position of its RAM mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenConfig {
    pub width: u16,
    pub height: u16,
    pub base: Addr,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            base: SCREEN_BASE_ADDR,
        }
    }
}

impl ScreenConfig {
    /// Count of character cells.
    pub fn size(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// First and last mapped addresses, both included in the mapping.
    ///
    /// Panics when the screen is empty or does not fit below the end of
    /// the address space.
    pub fn range(&self) -> (Addr, Addr) {
        let last = self
            .size()
            .checked_sub(1)
            .and_then(|offset| self.base.checked_add(offset));

        match last {
            Some(last) => (self.base, last),
            None => panic!(
                "a {}x{} screen cannot be mapped at #0x{:08X}",
                self.width, self.height, self.base
            ),
        }
    }

    pub fn contains(&self, addr: Addr) -> bool {
        let (first, last) = self.range();

        addr >= first && addr <= last
    }

    /// Cell `(x, y)` displaying the word at `addr`.
    pub fn position(&self, addr: Addr) -> (u16, u16) {
        let offset = addr - self.base;
        let width = self.width as u32;

        ((offset % width) as u16, (offset / width) as u16)
    }
}
