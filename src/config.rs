//! Configuration management for SCP Terminal
//!
//! Handles loading the optional configuration file and resolving the data
//! and preference directories. Command-line flags override what is loaded
//! here.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application identifier, used for the config and data directory names
pub const APP_ID: &str = "scp-terminal";

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE: &str = "config.json";

/// Seconds between routine system log lines
pub const DEFAULT_ROUTINE_LOG_INTERVAL: u64 = 8;

/// Seconds between anomaly warning rolls
pub const DEFAULT_WARNING_LOG_INTERVAL: u64 = 15;

/// A warning roll above this value logs an anomaly
pub const DEFAULT_WARNING_THRESHOLD: f64 = 0.7;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the startup feeds and translations
    pub data_dir: PathBuf,

    /// Directory of the preference store, platform data dir when unset
    pub storage_dir: Option<PathBuf>,

    /// Synthetic system log timers
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            storage_dir: None,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load the configuration file from the config directory, or defaults
    /// when there is none
    pub fn load() -> ConfigResult<Self> {
        let path = Self::config_dir()?.join(CONFIG_FILE);
        Self::load_from(&path)
    }

    /// Load from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("{}: {}", path.display(), e)))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.log.routine_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "log.routine_interval_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.log.warning_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "log.warning_interval_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.log.warning_threshold) {
            return Err(ConfigError::InvalidValue {
                key: "log.warning_threshold".to_string(),
                reason: "must be between 0 and 1".to_string(),
            });
        }
        Ok(())
    }

    /// Get the configuration directory path
    pub fn config_dir() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_ID))
            .ok_or(ConfigError::DirectoryError)
    }

    /// Get the platform data directory (default preference store location)
    pub fn platform_data_dir() -> ConfigResult<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_ID))
            .ok_or(ConfigError::DirectoryError)
    }

    /// Directory the preference store writes to
    pub fn storage_dir(&self) -> ConfigResult<PathBuf> {
        match &self.storage_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::platform_data_dir().map(|p| p.join("preferences")),
        }
    }
}

/// Synthetic log timer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub routine_interval_secs: u64,
    pub warning_interval_secs: u64,
    pub warning_threshold: f64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            routine_interval_secs: DEFAULT_ROUTINE_LOG_INTERVAL,
            warning_interval_secs: DEFAULT_WARNING_LOG_INTERVAL,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
        }
    }
}

impl LogConfig {
    pub fn routine_interval(&self) -> Duration {
        Duration::from_secs(self.routine_interval_secs)
    }

    pub fn warning_interval(&self) -> Duration {
        Duration::from_secs(self.warning_interval_secs)
    }
}
