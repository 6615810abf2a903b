//! Error types for record and dataset I/O.

use std::io;
use std::path::PathBuf;

/// Errors raised at the file boundary. Rendering itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        source: io::Error,
    },

    /// The file (or its parent directory) could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// File that was being written.
        path: PathBuf,
        source: io::Error,
    },

    /// The file was read but is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Serializing a document failed.
    #[error("failed to encode JSON: {0}")]
    Encode(#[from] serde_json::Error),

    /// A document had the wrong top-level shape.
    #[error("{what} is not a JSON object")]
    NotAnObject {
        /// Human-readable description of the offending document.
        what: String,
    },
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
