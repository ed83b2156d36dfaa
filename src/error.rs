//! Error types for SCP Terminal
//!
//! This module defines all custom error types used throughout the application.
//! None of them is fatal: callers degrade to defaults or skip persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type encompassing all error categories
#[derive(Error, Debug)]
pub enum AppError {
    /// Data feed errors
    #[error(transparent)]
    Data(#[from] DataError),

    /// Settings persistence errors
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Translation lookup errors
    #[error(transparent)]
    Translation(#[from] TranslationError),
}

/// Errors raised while loading the startup data feeds
#[derive(Error, Debug)]
pub enum DataError {
    /// Feed file could not be read
    #[error("Could not read data feed: {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Feed file is not valid JSON or a record is missing fields
    #[error("Invalid data feed {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings persistence errors
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The persisted blob exists but cannot be turned into settings
    #[error("Stored settings are malformed: {0}")]
    LoadError(String),

    /// The preference store cannot be read or written
    #[error("Preference storage is unavailable: {reason}")]
    StorageUnavailable { reason: String },
}

/// Configuration related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error reading the configuration file
    #[error("Could not load configuration: {0}")]
    LoadError(String),

    /// Error parsing configuration
    #[error("Invalid configuration format: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    /// Configuration directory error
    #[error("Could not access configuration directory")]
    DirectoryError,
}

/// Translation lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// The dotted key does not lead to a string in this language
    #[error("No translation for '{key}' in language '{language}'")]
    Missing { language: String, key: String },
}

/// Console command parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command word is not recognized
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// A required argument is missing
    #[error("{command}: missing {argument}")]
    MissingArgument { command: String, argument: String },

    /// An argument is not one of the accepted values
    #[error("{command}: invalid value '{value}' (expected {expected})")]
    InvalidValue {
        command: String,
        value: String,
        expected: String,
    },
}

/// Result type alias for operations that can fail with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for data feed operations
pub type DataResult<T> = Result<T, DataError>;

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl SettingsError {
    /// Create a storage failure from an I/O error
    pub fn storage(source: &std::io::Error) -> Self {
        SettingsError::StorageUnavailable {
            reason: source.to_string(),
        }
    }

    /// Create a user-friendly error message suitable for the system log
    pub fn user_message(&self) -> String {
        match self {
            SettingsError::LoadError(_) => {
                "Saved settings could not be read. Defaults restored.".to_string()
            }
            SettingsError::StorageUnavailable { .. } => {
                "Settings could not be saved. Changes last until the session ends.".to_string()
            }
        }
    }
}

impl DataError {
    /// Path of the feed that failed
    pub fn path(&self) -> &PathBuf {
        match self {
            DataError::ReadError { path, .. } | DataError::ParseError { path, .. } => path,
        }
    }
}
