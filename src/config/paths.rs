//! Default path helpers and symlink checks.
//! Resolves the config file location (honouring FILE_DISPATCH_CONFIG) and keeps
//! the default log file next to it.

use anyhow::{Result, anyhow};
use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, LOG_FILE_NAME};

const APP_DIR: &str = "file_dispatch";

/// Config file path.
///
/// Precedence:
/// 1) $FILE_DISPATCH_CONFIG: a file path, or a directory (then `config.xml`
///    inside it); relative values resolve against the current directory
/// 2) `<config_dir>/file_dispatch/config.xml`
/// 3) `$HOME/.config/file_dispatch/config.xml`
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        let mut p = PathBuf::from(raw);
        if p.is_relative() {
            p = env::current_dir()?.join(p);
        }
        if p.is_dir() {
            p.push(CONFIG_FILE_NAME);
        }
        return Ok(p);
    }

    if let Some(base) = config_dir() {
        return Ok(base.join(APP_DIR).join(CONFIG_FILE_NAME));
    }
    env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".config").join(APP_DIR).join(CONFIG_FILE_NAME))
        .ok_or_else(|| anyhow!("cannot determine a config directory (no config dir and no HOME)"))
}

/// Default log file path, colocated with the config file.
pub fn default_log_path() -> Result<PathBuf> {
    let cfg = default_config_path()?;
    let parent = cfg
        .parent()
        .ok_or_else(|| anyhow!("config path has no parent: {}", cfg.display()))?;
    Ok(parent.join(LOG_FILE_NAME))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
