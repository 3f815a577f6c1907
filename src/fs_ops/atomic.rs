//! Atomic rename helper.
//! - Does not check the destination: callers must do that first. Unix
//!   rename(2) replaces an existing file; on Windows the rename fails instead.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

use super::helpers::io_error_with_help_io;

pub fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst).map_err(io_error_with_help_io("rename", src))?;

    // Ignore fsync errors; the rename already happened.
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
