//! Dispatch orchestration.
//!
//! `run_dispatch` is the synchronous core: it enumerates the source directory
//! once, emits `Count(n)`, then classifies and moves each file, checking the
//! cancel token at every file boundary. `spawn_dispatch` runs the same loop on
//! a worker thread and delivers events over a channel so the caller stays
//! responsive.
//!
//! Notes:
//! - A file move in progress is never interrupted; cancellation takes effect
//!   before the next file.
//! - Input errors (missing/unreadable/empty directory) emit no events at all.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, info, warn};

use crate::cancel::CancelToken;
use crate::errors::DispatchError;
use crate::fs_ops::{list_files, process_one};
use crate::pattern::SubfolderPattern;
use crate::progress::ProgressEvent;

/// Validated input for one dispatch run.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    source_dir: PathBuf,
    pattern: SubfolderPattern,
}

impl DispatchRequest {
    /// Reject patterns without the `?<name>` token or that fail to compile.
    pub fn new(source_dir: impl Into<PathBuf>, pattern: &str) -> Result<Self, DispatchError> {
        Ok(Self {
            source_dir: source_dir.into(),
            pattern: SubfolderPattern::compile(pattern)?,
        })
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn pattern(&self) -> &SubfolderPattern {
        &self.pattern
    }
}

/// Terminal result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every file was processed (individual files may still have failed).
    Ok,
    /// Cancellation was observed before the last file.
    Cancel,
    /// Source directory missing, unreadable, or without files.
    ErrorInput,
}

impl DispatchOutcome {
    pub fn summary(&self) -> &'static str {
        match self {
            DispatchOutcome::Ok => "all files have been processed",
            DispatchOutcome::Cancel => "cancelled",
            DispatchOutcome::ErrorInput => "there are no files to process",
        }
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DispatchOutcome::Ok => "ok",
            DispatchOutcome::Cancel => "cancel",
            DispatchOutcome::ErrorInput => "error_input",
        })
    }
}

/// Run a dispatch on the current thread, passing each event to `emit`.
pub fn run_dispatch<F>(request: &DispatchRequest, cancel: &CancelToken, mut emit: F) -> DispatchOutcome
where
    F: FnMut(ProgressEvent),
{
    let dir = request.source_dir();
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Source directory does not exist");
        return DispatchOutcome::ErrorInput;
    }

    let files = match list_files(dir) {
        Ok(files) => files,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Cannot read source directory");
            return DispatchOutcome::ErrorInput;
        }
    };
    if files.is_empty() {
        info!(dir = %dir.display(), "No files to dispatch");
        return DispatchOutcome::ErrorInput;
    }

    info!(
        dir = %dir.display(),
        pattern = request.pattern().as_str(),
        total = files.len(),
        "Starting dispatch"
    );
    emit(ProgressEvent::Count(files.len()));

    for (index, file) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(processed = index, total = files.len(), "Dispatch cancelled");
            return DispatchOutcome::Cancel;
        }
        debug!(index, path = %file.display(), "Dispatching file");
        emit(ProgressEvent::Item(process_one(file, request.pattern())));
    }

    info!(total = files.len(), "Dispatch finished");
    DispatchOutcome::Ok
}

/// Handle to a dispatch running on a worker thread.
///
/// Drain [`events`](Self::events) (it ends when the worker finishes), then call
/// [`wait`](Self::wait) for the outcome. Dropping the receiver early does not
/// stop the worker; use the cancel token for that.
pub struct DispatchHandle {
    events: Receiver<ProgressEvent>,
    worker: JoinHandle<DispatchOutcome>,
}

impl DispatchHandle {
    pub fn events(&self) -> &Receiver<ProgressEvent> {
        &self.events
    }

    /// Block until the worker finishes and return its outcome.
    /// Undrained events are discarded.
    pub fn wait(self) -> Result<DispatchOutcome, DispatchError> {
        let DispatchHandle { events, worker } = self;
        drop(events);
        worker.join().map_err(|_| {
            error!("Dispatch worker panicked");
            DispatchError::WorkerPanicked
        })
    }
}

/// Start a dispatch on a new worker thread.
pub fn spawn_dispatch(request: DispatchRequest, cancel: CancelToken) -> DispatchHandle {
    let (tx, events) = mpsc::channel();
    let worker = thread::spawn(move || {
        run_dispatch(&request, &cancel, |event| {
            // Receiver gone: keep moving files, just stop reporting.
            let _ = tx.send(event);
        })
    });
    DispatchHandle { events, worker }
}
