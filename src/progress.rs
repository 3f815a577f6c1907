//! Progress events emitted by a dispatch run.
//!
//! A run emits one `Count` event followed by one `Item` event per file, in
//! enumeration order. `ItemResult`'s `Display` is the line shown to users:
//! `[OK] <file>` or `[NG] <message> <file>`.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single file was not moved. Never aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemFailure {
    #[error("file name is not valid UTF-8")]
    NonUtf8Name,

    #[error("file name does not match the sub-folder-name pattern")]
    NoMatch,

    #[error("the matching group for the sub-folder name could not be obtained")]
    MissingGroup,

    #[error("the sub-folder name is not a single path component")]
    UnsafeSubfolderName,

    #[error("a file with the same name as the sub-folder already exists")]
    SubfolderIsFile,

    #[error("a file with the same name already exists at the destination")]
    DestinationExists,

    #[error("failed to move file: {0}")]
    MoveFailed(String),
}

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub path: PathBuf,
    pub message: String,
    pub success: bool,
}

impl ItemResult {
    pub const SUCCESS_MESSAGE: &'static str = "success";

    pub fn success(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            message: Self::SUCCESS_MESSAGE.to_string(),
            success: true,
        }
    }

    pub fn failure(path: &Path, failure: &ItemFailure) -> Self {
        Self {
            path: path.to_path_buf(),
            message: failure.to_string(),
            success: false,
        }
    }

    /// Base name for display; empty when the path has none.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for ItemResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "[OK] {}", self.file_name())
        } else {
            write!(f, "[NG] {} {}", self.message, self.file_name())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Number of files the run will process; always first.
    Count(usize),
    Item(ItemResult),
}

/// Running totals a host can keep while draining events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressTally {
    pub total: usize,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl ProgressTally {
    pub fn apply(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Count(total) => {
                *self = Self {
                    total: *total,
                    ..Self::default()
                };
            }
            ProgressEvent::Item(item) => {
                self.processed += 1;
                if item.success {
                    self.succeeded += 1;
                } else {
                    self.failed += 1;
                }
            }
        }
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.processed)
    }
}
