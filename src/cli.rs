//! Command-line arguments.
//!
//! Flags override the config file; anything left unset keeps the configured
//! value, including the remembered pattern.

use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Sort the files of a directory into sub-folders named by the `name` group
/// of a regular expression, e.g. `--pattern '^(?<name>Report_\d+)'`.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Move files into sub-folders named by a regex capture group")]
pub struct Args {
    /// Directory whose files are dispatched (not recursive).
    #[arg(value_name = "SOURCE_DIR", value_hint = ValueHint::DirPath)]
    pub source_dir: Option<PathBuf>,

    /// Sub-folder pattern; must contain a named group `(?<name>...)`.
    /// Defaults to the last-used pattern.
    #[arg(long, short = 'p', value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Do not save the pattern to the config file.
    #[arg(long)]
    pub no_remember: bool,

    /// Same as `--log-level debug`; wins over `--log-level`.
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    pub debug: bool,

    /// quiet, normal, info or debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Print the config file location and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Print the group token every pattern must contain and exit.
    #[arg(long)]
    pub print_group_token: bool,

    /// Write logs as JSON lines.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            Some(LogLevel::Debug)
        } else {
            self.log_level
        }
    }

    /// Merge the flags that were given into `cfg`.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(dir) = &self.source_dir {
            cfg.source_dir = Some(dir.clone());
        }
        if let Some(pattern) = &self.pattern {
            cfg.pattern = Some(pattern.clone());
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.no_remember {
            cfg.remember_pattern = false;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
