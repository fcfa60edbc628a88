mod config;
mod error;
mod listener;
mod loader;
mod page_store;
mod ram;
mod rom;

pub use config::{RamConfig, DEFAULT_PAGE_WORDS};
pub use error::MemoryError;
pub use listener::{ListenerList, ReadListener, WriteListener};
pub use loader::{fatal, load_words};
pub use page_store::{Page, PageStore, INITIAL_BUCKET_COUNT};
pub use ram::Ram;
pub use rom::Rom;

/// Unit of every memory access.
pub type Word = u32;

/// Index of a word in a memory block. This is not a byte offset.
pub type Addr = u32;

/// Size of a [`Word`] once serialized in a file.
pub const WORD_BYTES: usize = 4;

/*
 * Page base
 * clearing the low bits of the address gives the address of the first word
 * of its page, `page_words` must be a power of two.
 */
pub fn page_base(addr: Addr, page_words: u32) -> Addr {
    addr & !(page_words - 1)
}
