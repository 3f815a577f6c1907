//! Config module.
//! Provides configuration types, default paths, XML loading/saving, and the
//! host-side request validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{
    load_config, load_config_from_xml_path, remember_last_pattern, save_config_xml_path,
};

/// Environment variable overriding the config location.
pub const CONFIG_ENV_VAR: &str = "FILE_DISPATCH_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.xml";
pub const LOG_FILE_NAME: &str = "file_dispatch.log";
