//! Filesystem storage for the match log.
//!
//! Handles reading and writing the local data directory:
//! - The match snapshot (whole log as one JSON document)
//! - Exported CSV/JSON files

mod snapshot;

pub use snapshot::*;

use std::path::PathBuf;
use thiserror::Error;

/// Default storage key; also the snapshot file stem.
pub const DEFAULT_STORAGE_KEY: &str = "tactichub-matches";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    /// Builder method to use a different storage key.
    pub fn with_storage_key(mut self, key: &str) -> Self {
        self.storage_key = key.to_string();
        self
    }

    /// Reject keys that would escape the data directory.
    pub fn validate(&self) -> Result<(), StorageError> {
        let key = self.storage_key.trim();
        if key.is_empty() || key.contains(|c: char| c == '/' || c == '\\') || key.starts_with('.') {
            return Err(StorageError::InvalidKey(self.storage_key.clone()));
        }
        Ok(())
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.data_dir.join("exports")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
