// Error types for Settings module

use thiserror::Error;

use super::types::SettingKey;

/// Errors surfaced by store writes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid value for {key}: {value}. {reason}")]
    InvalidRange {
        key: SettingKey,
        value: i64,
        reason: String,
    },

    #[error("Unknown embedding model: {label}. Must be one of: {known}")]
    UnknownModel { label: String, known: String },

    #[error("Unknown setting key: {0}")]
    UnknownKey(String),

    #[error("Invalid value for {key}: {value}. Not a valid integer")]
    InvalidValue { key: SettingKey, value: String },
}

/// Errors while loading settings configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] SettingsError),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
