use super::WORD_BYTES;
use tracing::{debug, warn};

/// Page size used when nothing better is known, 4 KiB host pages.
pub const DEFAULT_PAGE_WORDS: u32 = 1024;

const FALLBACK_PAGE_BYTES: usize = 4096;

/// Settings of a [`Ram`](super::Ram) block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamConfig {
    page_words: u32,
}

impl Default for RamConfig {
    fn default() -> Self {
        Self {
            page_words: DEFAULT_PAGE_WORDS,
        }
    }
}

impl RamConfig {
    /// Panics if `page_words` is not a power of two.
    pub fn with_page_words(page_words: u32) -> Self {
        assert!(
            page_words.is_power_of_two(),
            "page size must be a power of two, got {} words",
            page_words
        );

        Self { page_words }
    }

    /// Pages as large as the memory pages of the host system.
    pub fn from_host() -> Self {
        Self::from_page_bytes(host_page_bytes())
    }

    fn from_page_bytes(page_bytes: usize) -> Self {
        match u32::try_from(page_bytes / WORD_BYTES) {
            Ok(page_words) if page_words.is_power_of_two() => {
                debug!(page_bytes, page_words, "using host page size");
                Self { page_words }
            }
            _ => {
                warn!(
                    page_bytes,
                    "unusable host page size, falling back to {} words", DEFAULT_PAGE_WORDS
                );
                Self::default()
            }
        }
    }

    pub fn page_words(&self) -> u32 {
        self.page_words
    }
}

#[cfg(unix)]
fn host_page_bytes() -> usize {
    // SAFETY: sysconf only reads a system setting.
    let page_bytes = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };

    usize::try_from(page_bytes)
        .ok()
        .filter(|&bytes| bytes > 0)
        .unwrap_or(FALLBACK_PAGE_BYTES)
}

#[cfg(not(unix))]
fn host_page_bytes() -> usize {
    FALLBACK_PAGE_BYTES
}
