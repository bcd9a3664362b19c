//! # Status Snapshot Store
//!
//! Reads and writes the last-known snapshot of player statuses as a single
//! JSON file. Loading fails soft: a missing or unparseable snapshot degrades
//! to an empty mapping so a run diffs everything as NEW instead of halting.
//!
//! The store assumes at most one concurrent invocation (the external
//! scheduler serializes triggers); there is no locking.

use crate::players::record::PlayerRecord;
use log::warn;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a snapshot.
///
/// Load errors are deliberately absorbed; only writes surface an error, and
/// even those must not abort notification dispatch.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure creating the parent directory or writing the file.
    #[error("I/O error writing snapshot: {0}")]
    Io(#[from] std::io::Error),

    /// The record list could not be serialized to JSON.
    #[error("snapshot serialization failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed store for the previous poll's player statuses.
pub struct StatusStore {
    path: PathBuf,
}

impl StatusStore {
    /// Creates a store backed by the given snapshot path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the previous snapshot as a name -> status mapping.
    ///
    /// Returns an empty mapping when the file does not exist or cannot be
    /// parsed. Full records are persisted but only the projection is consumed
    /// here.
    pub fn load(&self) -> HashMap<String, String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_str::<Vec<PlayerRecord>>(&raw) {
            Ok(records) => records
                .into_iter()
                .map(|record| (record.name, record.status))
                .collect(),
            Err(e) => {
                warn!(
                    "Snapshot at {} is not valid JSON ({}); treating prior state as empty",
                    self.path.display(),
                    e
                );
                HashMap::new()
            }
        }
    }

    /// Overwrites the snapshot with the full current record list.
    ///
    /// Creates any missing parent directory. Full records (not just the
    /// name -> status projection) are written so future loads can recover the
    /// richer fields.
    pub fn save(&self, records: &[PlayerRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            // A bare relative filename has an empty parent; nothing to create.
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// The path the snapshot is persisted at.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_records() -> Vec<PlayerRecord> {
        vec![
            PlayerRecord::new("1", "Lobby", "Online", Some(0)),
            PlayerRecord::new("2", "Cafeteria", "Offline", Some(120)),
        ]
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = StatusStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("status.json");
        fs::write(&path, "{ not valid json").unwrap();
        let store = StatusStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_the_projection() {
        let dir = tempdir().unwrap();
        let store = StatusStore::new(dir.path().join("status.json"));
        store.save(&sample_records()).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get("Lobby").map(String::as_str), Some("Online"));
        assert_eq!(loaded.get("Cafeteria").map(String::as_str), Some("Offline"));
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let store = StatusStore::new(dir.path().join("nested/deeper/status.json"));
        store.save(&sample_records()).unwrap();
        assert!(store.path().is_file());
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempdir().unwrap();
        let store = StatusStore::new(dir.path().join("status.json"));
        store.save(&sample_records()).unwrap();
        store
            .save(&[PlayerRecord::new("3", "Entrance", "Online", None)])
            .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("Entrance"));
    }
}
