//! RSVP settings stored in `rsvp.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::core::deadline::{DeadlineConfig, DeadlineSettings};

/// Default settings file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "rsvp.toml";

/// Commented settings written by `rsvp init`.
pub const CONFIG_TEMPLATE: &str = r#"# RSVP settings.

# Remove this table to accept submissions without a deadline.
[deadline]
# Local wall-clock deadline, YYYY-MM-DD HH:MM.
deadline_datetime = "2026-06-01 23:59"
# IANA timezone the deadline is expressed in.
timezone = "UTC"
# Late submissions are accepted for this many hours after the deadline.
grace_period_hours = 24
# A countdown warning is shown this many days before the deadline.
warning_days = 7

[files]
# Record table, one row per guest.
csv_file = "rsvps.csv"
"#;

/// RSVP settings (TOML).
///
/// Missing fields default; a missing `[deadline]` table means no deadline.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RsvpConfig {
    pub deadline: Option<DeadlineSettings>,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilesConfig {
    /// Record table path. Relative paths resolve against the settings file.
    pub csv_file: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            csv_file: PathBuf::from("rsvps.csv"),
        }
    }
}

impl RsvpConfig {
    pub fn validate(&self) -> Result<()> {
        if self.files.csv_file.as_os_str().is_empty() {
            return Err(anyhow!("files.csv_file must be a non-empty path"));
        }
        Ok(())
    }

    /// Resolve the configured deadline.
    ///
    /// Returns `None` when no deadline is configured, or when it cannot be
    /// resolved (logged); an unusable deadline never blocks submissions.
    pub fn deadline_config(&self) -> Option<DeadlineConfig> {
        let settings = self.deadline.as_ref()?;
        match DeadlineConfig::from_settings(settings) {
            Ok(config) => Some(config),
            Err(err) => {
                error!(error = %err, "error parsing deadline configuration, ignoring deadline");
                None
            }
        }
    }
}

/// Load settings from a TOML file.
///
/// If the file is missing, returns `RsvpConfig::default()`. A relative
/// `files.csv_file` is rebased onto the settings file's directory.
pub fn load_config(path: &Path) -> Result<RsvpConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "settings file missing, using defaults");
        let cfg = RsvpConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut cfg: RsvpConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    if cfg.files.csv_file.is_relative() {
        if let Some(parent) = path.parent() {
            cfg.files.csv_file = parent.join(&cfg.files.csv_file);
        }
    }
    debug!(path = %path.display(), csv_file = %cfg.files.csv_file.display(), "settings loaded");
    Ok(cfg)
}

/// Write the commented settings template unless a file exists (or `force`).
///
/// Returns true if the file was written.
pub fn write_config_template(path: &Path, force: bool) -> Result<bool> {
    if !force && path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, CONFIG_TEMPLATE).with_context(|| format!("write {}", path.display()))?;
    Ok(true)
}
