use super::{MemoryError, Word, WORD_BYTES};
use byteorder::{ByteOrder, NativeEndian};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads a raw stream of host-endian words. Word `i` of the file is the
/// `i`-th element of the returned vector.
pub fn load_words(path: impl AsRef<Path>) -> Result<Vec<Word>, MemoryError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| MemoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.is_empty() {
        return Err(MemoryError::Empty {
            path: path.to_path_buf(),
        });
    }
    if bytes.len() % WORD_BYTES != 0 {
        return Err(MemoryError::Misaligned {
            path: path.to_path_buf(),
            len: bytes.len(),
        });
    }

    let mut words: Vec<Word> = vec![0; bytes.len() / WORD_BYTES];
    NativeEndian::read_u32_into(&bytes, &mut words);
    debug!(path = %path.display(), words = words.len(), "memory image loaded");

    Ok(words)
}

/// Reports a loading failure on the error stream and aborts the process.
pub fn fatal(error: &MemoryError) -> ! {
    eprintln!("error: failed to read file '{}'", error.path().display());
    std::process::abort()
}
