//! Filesystem operations: enumeration and per-file classify-and-move.

mod atomic;
mod classify;
mod helpers;
mod list;
mod util;

pub use classify::{process_one, subfolder_for};
pub use helpers::{describe_io_error, io_error_with_help, io_error_with_help_io};
pub use list::list_files;
