//! User configuration for meetcost
//!
//! Stored as JSON in `<config_dir>/meetcost/config.json`. A missing or broken
//! file never stops the meter: [`MeterConfig::load`] falls back to defaults.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_FILE: &str = "config.json";

/// Color scheme for the terminal UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Dark theme (default): Black bg, White fg
    #[default]
    Dark,
    /// Light theme: White bg, Black fg
    Light,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Dark => ColorScheme::Light,
            ColorScheme::Light => ColorScheme::Dark,
        }
    }
}

/// meetcost settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    /// Initial billable rate per attendee, currency per hour (raw text)
    pub default_rate: String,
    /// Prefix used when formatting costs
    pub currency_symbol: String,
    /// Display refresh period while the meter runs
    pub tick_interval_ms: u64,
    pub color_scheme: ColorScheme,
    /// Key string → action name, e.g. `{"Ctrl+R": "reset"}`
    pub keybindings: HashMap<String, String>,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            default_rate: "0.00".to_string(),
            currency_symbol: "$".to_string(),
            tick_interval_ms: 1_000,
            color_scheme: ColorScheme::Dark,
            keybindings: HashMap::new(),
        }
    }
}

impl MeterConfig {
    /// `<config_dir>/meetcost/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meetcost").join(CONFIG_FILE))
    }

    /// Read the config at `path`. `Ok(None)` when the file does not exist.
    pub fn try_load(path: &Path) -> Result<Option<Self>, CoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "Config file not found (optional)");
                return Ok(None);
            }
            Err(source) => {
                return Err(CoreError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self =
            serde_json::from_str(&content).map_err(|source| CoreError::ConfigParse {
                path: path.to_path_buf(),
                message: source.to_string(),
                source,
            })?;
        config.validate()?;

        debug!(?path, "Loaded config");
        Ok(Some(config))
    }

    /// Load config from `path`, returning defaults on any error.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                warn!(error = %e, "Ignoring unusable config, using defaults");
                Self::default()
            }
        }
    }

    /// Persist config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| CoreError::ConfigWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|source| {
            CoreError::ConfigParse {
                path: path.to_path_buf(),
                message: "failed to serialize config".to_string(),
                source,
            }
        })?;

        std::fs::write(path, content).map_err(|source| CoreError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.tick_interval_ms == 0 {
            return Err(CoreError::InvalidConfig {
                message: "tick_interval_ms must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
