//! Core library for `file_dispatch`.
//!
//! Sorts the files of one directory into sub-folders: each file name is
//! matched against a regex whose `name` group yields the sub-folder, the
//! sub-folder is created next to the file if needed, and the file is renamed
//! into it. Runs report one `Count` event followed by one `Item` event per
//! file, and can be cancelled between files.
//!
//! ```no_run
//! use file_dispatch::{CancelToken, DispatchRequest, ProgressEvent, spawn_dispatch};
//!
//! let request = DispatchRequest::new("/data/inbox", r"^(?<name>Report_\d+)")?;
//! let handle = spawn_dispatch(request, CancelToken::new());
//! for event in handle.events() {
//!     if let ProgressEvent::Item(item) = event {
//!         println!("{item}");
//!     }
//! }
//! let outcome = handle.wait()?;
//! # Ok::<(), file_dispatch::DispatchError>(())
//! ```

pub mod cancel;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod pattern;
pub mod platform;
pub mod progress;

pub use cancel::CancelToken;
pub use config::{
    CONFIG_ENV_VAR, Config, LogLevel, default_config_path, default_log_path, load_config,
    load_config_from_xml_path, path_has_symlink_ancestor, remember_last_pattern,
    save_config_xml_path,
};
pub use dispatch::{DispatchHandle, DispatchOutcome, DispatchRequest, run_dispatch, spawn_dispatch};
pub use errors::DispatchError;
pub use fs_ops::{list_files, process_one};
pub use pattern::{REGEX_GROUP_NAME, SubfolderPattern, is_valid_pattern, required_group_token};
pub use progress::{ItemFailure, ItemResult, ProgressEvent, ProgressTally};

/// Convenience re-exports for hosts embedding the dispatcher.
pub mod prelude {
    pub use crate::cancel::CancelToken;
    pub use crate::dispatch::{
        DispatchHandle, DispatchOutcome, DispatchRequest, run_dispatch, spawn_dispatch,
    };
    pub use crate::errors::DispatchError as Error;
    pub use crate::pattern::{is_valid_pattern, required_group_token};
    pub use crate::progress::{ItemResult, ProgressEvent, ProgressTally};
}
