//! I/O error enrichment.
//!
//! Wraps io::Error with the operation, the path and a short platform-aware
//! hint, for both anyhow::Result and io::Result call sites:
//!
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create dir", dir))?;
//!   fs::rename(a, b).map_err(io_error_with_help_io("rename", a))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

#[cfg(unix)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
        libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
        libc::EBUSY => Some("resource busy; the file may be open in another program"),
        libc::ENOENT => Some("path not found; it may have been moved or deleted"),
        libc::EEXIST => Some("already exists; remove the target or rename the file"),
        libc::ENOTDIR => Some("a path component is not a directory"),
        libc::EISDIR => Some("target is a directory"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EROFS => Some("read-only filesystem; cannot write here"),
        libc::ENAMETOOLONG => Some("filename or path too long; shorten the sub-folder name"),
        _ => None,
    }
}

#[cfg(windows)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),
        17 => Some("not same device; cross-filesystem move"),
        32 => Some("sharing violation; file is in use"),
        2 | 3 => Some("path not found; it may have been moved or deleted"),
        80 | 183 => Some("already exists; remove the target or rename the file"),
        112 => Some("insufficient disk space"),
        206 => Some("filename or path too long (MAX_PATH exceeded)"),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn hint_for_os_code(_code: i32) -> Option<&'static str> {
    None
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        io::ErrorKind::AlreadyExists => Some("already exists; remove the target or rename the file"),
        _ => None,
    }
}

/// "<op> '<path>': <error>; <hint> [os code: N]"
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => hint_for_os_code(code),
        None => hint_for_kind(e.kind()),
    };
    if let Some(hint) = hint {
        msg.push_str("; ");
        msg.push_str(hint);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(describe_io_error(op, path, &e))
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe_io_error(op, path, &e))
}
