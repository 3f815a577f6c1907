//! Per-file classify-and-move.
//!
//! Each file is handled on its own: the base name is matched against the
//! pattern, the captured `name` group becomes a sub-folder next to the file,
//! and the file is renamed into it. Every failure becomes an `ItemResult`
//! with `success = false`; nothing here aborts a run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::pattern::{Capture, SubfolderPattern};
use crate::progress::{ItemFailure, ItemResult};

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help_io;
use super::util::is_single_component;

/// Classify `path` by `pattern` and move it into its sub-folder.
pub fn process_one(path: &Path, pattern: &SubfolderPattern) -> ItemResult {
    match classify_and_move(path, pattern) {
        Ok(dest) => {
            info!(src = %path.display(), dest = %dest.display(), "Moved file into sub-folder");
            ItemResult::success(path)
        }
        Err(failure) => {
            warn!(path = %path.display(), reason = %failure, "File not moved");
            ItemResult::failure(path, &failure)
        }
    }
}

/// Destination sub-folder for `path`, without touching the filesystem.
pub fn subfolder_for(path: &Path, pattern: &SubfolderPattern) -> Result<PathBuf, ItemFailure> {
    let file_name = path
        .file_name()
        .ok_or(ItemFailure::NoMatch)?
        .to_str()
        .ok_or(ItemFailure::NonUtf8Name)?;

    let name = match pattern.capture(file_name) {
        Capture::NoMatch => return Err(ItemFailure::NoMatch),
        Capture::MissingGroup => return Err(ItemFailure::MissingGroup),
        Capture::Name(name) => name,
    };
    if !is_single_component(&name) {
        return Err(ItemFailure::UnsafeSubfolderName);
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(name))
}

fn classify_and_move(path: &Path, pattern: &SubfolderPattern) -> Result<PathBuf, ItemFailure> {
    let subfolder = subfolder_for(path, pattern)?;

    let subfolder_exists = match fs::metadata(&subfolder) {
        Ok(meta) if meta.is_dir() => true,
        Ok(_) => return Err(ItemFailure::SubfolderIsFile),
        Err(_) => false,
    };

    // file_name() is Some here; subfolder_for already read it.
    let dest = subfolder.join(path.file_name().unwrap_or_default());
    // rename() below would replace it on Unix.
    if fs::symlink_metadata(&dest).is_ok() {
        return Err(ItemFailure::DestinationExists);
    }

    move_into(path, &subfolder, subfolder_exists, &dest)
        .map_err(|e| ItemFailure::MoveFailed(e.to_string()))?;
    Ok(dest)
}

fn move_into(src: &Path, subfolder: &Path, subfolder_exists: bool, dest: &Path) -> io::Result<()> {
    if !subfolder_exists {
        fs::create_dir(subfolder).map_err(io_error_with_help_io("create sub-folder", subfolder))?;
    }
    try_atomic_move(src, dest)
}
