//! Application configuration.
//!
//! Stores the athlete defaults (FTP, pace level) used when a command does
//! not supply them, plus output preferences. Persisted as TOML in the
//! platform data directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::pace::is_valid_pace_level;

/// Athlete defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AthleteSettings {
    /// Functional Threshold Power in watts
    pub ftp: Option<f64>,
    /// Pace level (1-10)
    pub pace_level: Option<u8>,
}

impl AthleteSettings {
    /// Update FTP. Must be a positive number of watts.
    pub fn set_ftp(&mut self, ftp: f64) -> Result<(), ConfigError> {
        if !(ftp.is_finite() && ftp > 0.0) {
            return Err(ConfigError::InvalidValue(format!("FTP must be positive, got {ftp}")));
        }
        self.ftp = Some(ftp);
        Ok(())
    }

    /// Update pace level (1-10).
    pub fn set_pace_level(&mut self, level: u8) -> Result<(), ConfigError> {
        if !is_valid_pace_level(level) {
            return Err(ConfigError::InvalidValue(format!(
                "Pace level must be between 1 and 10, got {level}"
            )));
        }
        self.pace_level = Some(level);
        Ok(())
    }
}

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Decimal places for TSS / IF / pace
    pub decimals: usize,
    /// Emit JSON instead of text
    pub json: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            decimals: 1,
            json: false,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Athlete defaults
    pub athlete: AthleteSettings,
    /// Output settings
    pub display: DisplaySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            athlete: AthleteSettings::default(),
            display: DisplaySettings::default(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "trainmetrics", "TrainMetrics")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path())
}

/// Load configuration from `path`. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if let Some(level) = config.athlete.pace_level {
        if !is_valid_pace_level(level) {
            return Err(ConfigError::InvalidValue(format!(
                "Pace level must be between 1 and 10, got {level}"
            )));
        }
    }

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to `path`, creating parent directories.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
