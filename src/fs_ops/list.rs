//! Directory enumeration for a dispatch run.
//! Only the immediate entries of the directory are considered; sub-directories
//! (including ones created by earlier runs) are skipped.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// List the regular files directly inside `dir`, in filesystem order.
/// Symlinks are followed for the "is a file" test but moved as links.
/// Fails only if `dir` itself cannot be read.
pub fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            // An error without a depth-1 path is the root itself being unreadable.
            Err(e) if e.path().is_none_or(|p| p == dir) => {
                return Err(e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("directory walk failed")));
            }
            Err(e) => {
                debug!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        let path = entry.into_path();
        if path.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-file entry");
        }
    }
    Ok(files)
}
