//! Whole-log JSON snapshot.
//!
//! The snapshot is the source of truth for the match log. Every change
//! rewrites the full file; there is no incremental format.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::models::MatchRecord;
use crate::store::MatchStore;

/// Reads and writes the match snapshot file.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a snapshot store for the given file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Snapshot store at the configured key inside the data directory.
    pub fn for_config(config: &StorageConfig) -> Self {
        Self::new(config.snapshot_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Load the match log.
    ///
    /// A missing file is an empty log. So is a file that does not parse: the
    /// damage is logged and nothing is salvaged from it. Only I/O failures
    /// are returned as errors.
    pub fn load(&self) -> Result<MatchStore, StorageError> {
        if !self.path.exists() {
            debug!("No snapshot at {:?}, starting empty", self.path);
            return Ok(MatchStore::default());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);

        match serde_json::from_reader::<_, Vec<MatchRecord>>(reader) {
            Ok(matches) => {
                debug!("Read {} matches from {:?}", matches.len(), self.path);
                Ok(MatchStore::new(matches))
            }
            Err(e) => {
                warn!(
                    "Snapshot {:?} is unreadable, treating as empty: {}",
                    self.path, e
                );
                Ok(MatchStore::default())
            }
        }
    }

    /// Replace the snapshot with the full contents of `store`.
    pub fn save(&self, store: &MatchStore) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, store.matches())?;
        writer.flush()?;

        info!("Wrote {} matches to {:?}", store.len(), self.path);
        Ok(store.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn record(id: i64, p1: &str, p2: &str) -> MatchRecord {
        MatchRecord::new(
            id,
            p1.to_string(),
            p2.to_string(),
            2,
            1,
            55,
            45,
            "4-2-3-1".to_string(),
            NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
        )
        .with_venue("Home".to_string())
    }

    fn test_config(temp_dir: &TempDir) -> StorageConfig {
        StorageConfig::new(temp_dir.path().join("data"))
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = SnapshotStore::for_config(&test_config(&temp_dir));

        let store = MatchStore::new(vec![record(2, "Alice", "Bob"), record(1, "Carol", "Dave")]);
        let count = snapshot.save(&store).unwrap();
        assert_eq!(count, 2);

        let loaded = snapshot.load().unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.matches()[0].id, 2);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = SnapshotStore::for_config(&test_config(&temp_dir));

        assert!(!snapshot.exists());
        assert!(snapshot.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "[{\"id\": 1, \"player1\": ").unwrap();

        let snapshot = SnapshotStore::new(path);
        assert!(snapshot.load().unwrap().is_empty());
    }

    #[test]
    fn test_load_partially_valid_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mixed.json");

        let good = serde_json::to_string(&record(1, "Alice", "Bob")).unwrap();
        std::fs::write(&path, format!("[{}, {{\"id\": 2}}]", good)).unwrap();

        let snapshot = SnapshotStore::new(path);
        assert!(snapshot.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = SnapshotStore::for_config(&test_config(&temp_dir));

        snapshot
            .save(&MatchStore::new(vec![record(1, "Old", "Rival")]))
            .unwrap();
        snapshot
            .save(&MatchStore::new(vec![
                record(3, "New", "Rival"),
                record(2, "Newer", "Rival"),
            ]))
            .unwrap();

        let loaded = snapshot.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.matches()[0].player1, "New");
    }

    #[test]
    fn test_save_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = SnapshotStore::for_config(&test_config(&temp_dir));

        snapshot.save(&MatchStore::default()).unwrap();
        assert_eq!(std::fs::read_to_string(snapshot.path()).unwrap(), "[]");
    }

    #[test]
    fn test_snapshot_path_uses_storage_key() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir).with_storage_key("league-b");
        let snapshot = SnapshotStore::for_config(&config);

        assert!(snapshot.path().ends_with("data/league-b.json"));
    }
}
