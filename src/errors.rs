//! Typed error definitions for file_dispatch.
//! Request-level failures reject a dispatch before it starts; per-file failures
//! never surface here (see `progress::ItemFailure`).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Pattern does not contain the named group {token}: '{pattern}'")]
    MissingGroup { pattern: String, token: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("No pattern given; pass --pattern or set <pattern> in the config")]
    MissingPattern,

    #[error("No source directory given")]
    MissingSource,

    #[error("Source directory not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Source path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Dispatch worker panicked")]
    WorkerPanicked,
}

impl DispatchError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            DispatchError::MissingGroup { .. } => 10,
            DispatchError::BadPattern { .. } => 11,
            DispatchError::MissingPattern => 12,
            DispatchError::MissingSource => 19,
            DispatchError::SourceNotFound(_) => 20,
            DispatchError::NotADirectory(_) => 21,
            DispatchError::WorkerPanicked => 90,
        }
    }
}
