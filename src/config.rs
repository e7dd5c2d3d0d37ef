use crate::timeout::TimeoutSetting;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error occurred while reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error occurred
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Main configuration structure for dbquick
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Database connection configuration
    pub database: DatabaseConfig,
}

/// Database connection configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Connection string handed to the driver verbatim
    pub url: String,
    /// Raw connect timeout in milliseconds; integer or string, clamped
    /// into the permitted range before use. Absent or unparsable values
    /// behave as zero and clamp to the floor.
    #[serde(default)]
    pub connect_timeout: Option<TimeoutSetting>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}
