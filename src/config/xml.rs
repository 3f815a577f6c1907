//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Saves the last-used pattern back, atomically and with 0600 permissions.
//!
//! Notes:
//! - A missing config file is not an error; defaults apply.
//! - Unknown XML fields are rejected to surface misconfigurations early.
//! - The pattern is stored verbatim (regex metacharacters such as `<` are
//!   escaped by the XML writer, not by us).

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use quick_xml::se::to_string as to_xml_string;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::fs_ops::io_error_with_help;
use crate::platform::{set_dir_mode_0700, write_config_atomic_0600};

/// Struct mirroring the XML config.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    log_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    log_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remember_pattern: Option<bool>,
}

// Map XmlConfig -> Config; absent or blank fields keep defaults.
fn xml_to_config(parsed: XmlConfig) -> Config {
    let mut cfg = Config::default();

    cfg.pattern = parsed.pattern.filter(|p| !p.trim().is_empty());
    if let Some(level) = parsed
        .log_level
        .as_deref()
        .and_then(|s| s.trim().parse::<LogLevel>().ok())
    {
        cfg.log_level = level;
    }
    if let Some(s) = parsed.log_file.as_deref() {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }
    if let Some(remember) = parsed.remember_pattern {
        cfg.remember_pattern = remember;
    }
    cfg
}

fn config_to_xml(cfg: &Config) -> XmlConfig {
    // Only persist a log file the user chose; the default follows the config.
    let default_log = default_log_path().ok();
    let log_file = cfg
        .log_file
        .as_ref()
        .filter(|p| Some(*p) != default_log.as_ref())
        .map(|p| p.display().to_string());

    XmlConfig {
        pattern: cfg.pattern.clone(),
        log_level: Some(cfg.log_level.to_string()),
        log_file,
        remember_pattern: Some(cfg.remember_pattern),
    }
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    Ok(xml_to_config(parsed))
}

/// Load the config from its default location; defaults when the file is absent.
pub fn load_config() -> Result<Config> {
    let path = default_config_path().context("resolve config path")?;
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(Config::default());
    }
    load_config_from_xml_path(&path)
}

/// Write `cfg` to `path` (source_dir is never persisted).
pub fn save_config_xml_path(path: &Path, cfg: &Config) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to write config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(io_error_with_help("create config directory", parent))?;
        let _ = set_dir_mode_0700(parent);
    }

    let body = to_xml_string(&config_to_xml(cfg)).context("serialize config xml")?;
    write_config_atomic_0600(path, format!("{body}\n").as_bytes())?;
    Ok(())
}

/// Persist `pattern` as the last-used pattern at the default config location,
/// keeping any other settings already stored there.
pub fn remember_last_pattern(pattern: &str) -> Result<PathBuf> {
    let path = default_config_path().context("resolve config path")?;
    let mut cfg = if path.exists() {
        load_config_from_xml_path(&path)?
    } else {
        Config::default()
    };
    if cfg.pattern.as_deref() == Some(pattern) {
        return Ok(path);
    }
    cfg.pattern = Some(pattern.to_string());
    save_config_xml_path(&path, &cfg)?;
    info!(path = %path.display(), "Saved last-used pattern");
    Ok(path)
}
