use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of loading a memory image from a file.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("failed to read file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(
        "failed to read file '{}' ({} bytes is not a whole number of words)",
        .path.display(),
        .len
    )]
    Misaligned { path: PathBuf, len: usize },
    #[error("failed to read file '{}' (file is empty)", .path.display())]
    Empty { path: PathBuf },
}

impl MemoryError {
    /// File the error is about.
    pub fn path(&self) -> &Path {
        match self {
            MemoryError::Io { path, .. }
            | MemoryError::Misaligned { path, .. }
            | MemoryError::Empty { path } => path,
        }
    }
}
