//! Error types for Spartan
//!
//! Library code returns `SpartanError`; the binary wraps it in `anyhow`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for Spartan operations
pub type SpartanResult<T> = Result<T, SpartanError>;

/// Main error type for Spartan operations
#[derive(Error, Debug)]
pub enum SpartanError {
    /// Reading, writing or creating a path failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source glob could not be parsed
    #[error("invalid source pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A glob entry could not be read while enumerating sources
    #[error("cannot enumerate {}: {message}", .path.display())]
    Enumerate { path: PathBuf, message: String },

    /// The preprocessor rejected a source file
    #[error("preprocessing failed for {}: {message}", .file.display())]
    Preprocess { file: PathBuf, message: String },

    /// The file-system watcher could not be registered
    #[error("watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Malformed configuration file
    #[error("invalid config in {}: {message}", .file.display())]
    InvalidConfig { file: PathBuf, message: String },
}

impl SpartanError {
    /// Attach a path to a raw I/O error
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        SpartanError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this is a per-file preprocessing failure (non-fatal to a build)
    pub fn is_preprocess(&self) -> bool {
        matches!(self, SpartanError::Preprocess { .. })
    }
}
