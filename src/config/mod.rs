//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{FORMATIONS, VENUES};
use crate::storage::{StorageConfig, DEFAULT_STORAGE_KEY};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Snapshot name inside the data directory
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Months shown in the dashboard trend
    #[serde(default = "default_recent_months")]
    pub recent_months: usize,

    /// Formations offered at match entry
    #[serde(default = "default_formations")]
    pub formations: Vec<String>,

    /// Venues offered at match entry
    #[serde(default = "default_venues")]
    pub venues: Vec<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_recent_months() -> usize {
    6
}

fn default_formations() -> Vec<String> {
    FORMATIONS.iter().map(|f| f.to_string()).collect()
}

fn default_venues() -> Vec<String> {
    VENUES.iter().map(|v| v.to_string()).collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            storage_key: default_storage_key(),
            recent_months: default_recent_months(),
            formations: default_formations(),
            venues: default_venues(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Storage paths derived from this configuration.
    pub fn storage(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone()).with_storage_key(&self.storage_key)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.storage()
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.recent_months == 0 {
            return Err(ConfigError::ValidationError(
                "recent_months must be greater than 0".to_string(),
            ));
        }

        if self.formations.is_empty() {
            return Err(ConfigError::ValidationError(
                "At least one formation must be configured".to_string(),
            ));
        }

        Ok(())
    }
}
