pub mod memory;

pub use memory::{Addr, MemoryError, Ram, RamConfig, ReadListener, Rom, Word, WriteListener};
