//! Core configuration types.
//! - Config holds host settings; the dispatch core never reads it directly.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;

/// Console and file verbosity, from least to most output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Quiet,
    #[default]
    Normal,
    Info,
    Debug,
}

// Accepted spellings per level; the first one is canonical.
const LEVEL_NAMES: [(LogLevel, &[&str]); 4] = [
    (LogLevel::Quiet, &["quiet", "error", "none"]),
    (LogLevel::Normal, &["normal"]),
    (LogLevel::Info, &["info", "verbose", "detailed"]),
    (LogLevel::Debug, &["debug", "trace"]),
];

impl LogLevel {
    /// Case-insensitive lookup over the accepted spellings.
    pub fn parse(s: &str) -> Option<Self> {
        LEVEL_NAMES
            .iter()
            .find(|(_, names)| names.iter().any(|n| n.eq_ignore_ascii_case(s)))
            .map(|(level, _)| *level)
    }

    pub fn as_str(self) -> &'static str {
        LEVEL_NAMES
            .iter()
            .find(|(level, _)| *level == self)
            .map_or("normal", |(_, names)| names[0])
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown log level '{s}' (quiet, normal, info, debug)"))
    }
}

/// Host settings for a dispatch.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose files are dispatched (CLI only; never persisted)
    pub source_dir: Option<PathBuf>,
    /// Sub-folder pattern; persisted as the last-used pattern
    pub pattern: Option<String>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Save the pattern back to the config after a valid request
    pub remember_pattern: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: None,
            pattern: None,
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path().ok(),
            remember_pattern: true,
        }
    }
}
