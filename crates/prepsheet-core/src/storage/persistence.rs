//! Snapshot persistence
//!
//! Saves and loads the sheet snapshot as pretty-printed JSON. Uses atomic
//! writes (write to temp file, fsync, then rename) so the snapshot is never
//! left in a partially-written state.
//!
//! Storage location: `<data_dir>/prep-sheet-storage.json` (configurable via
//! `Config`). A snapshot that exists but cannot be deserialized is moved
//! aside to `<name>.corrupt.backup` and treated as missing, so the sheet
//! starts empty instead of refusing to load.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::Config;
use crate::models::Snapshot;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for sheet snapshots
pub struct SnapshotPersistence {
    config: Config,
}

impl SnapshotPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a snapshot exists on disk
    pub fn exists(&self) -> bool {
        self.config.snapshot_path().exists()
    }

    /// Size of the snapshot file in bytes, if present
    pub fn snapshot_size(&self) -> Option<u64> {
        fs::metadata(self.config.snapshot_path())
            .ok()
            .map(|m| m.len())
    }

    /// Save a snapshot to disk using atomic write
    pub fn save(&self, snapshot: &Snapshot) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(snapshot).map_err(StorageError::Serialize)?;
        let target_path = self.config.snapshot_path();
        atomic_write(&target_path, &bytes)
    }

    /// Load a snapshot from disk
    ///
    /// Returns `Ok(None)` if the snapshot file doesn't exist. A file that
    /// exists but can't be parsed is quarantined to a backup path with a
    /// warning, and `Ok(None)` is returned so the caller starts empty.
    pub fn load(&self) -> StorageResult<Option<Snapshot>> {
        let path = self.config.snapshot_path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| StorageError::ReadSnapshot {
            path: path.clone(),
            source: e,
        })?;

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                let backup_path = quarantine(&path);
                warn!(
                    path = %path.display(),
                    backup = %backup_path.display(),
                    error = %err,
                    "snapshot is not valid JSON, starting with an empty sheet"
                );
                Ok(None)
            }
        }
    }

    /// Load an existing snapshot or fall back to an empty one
    pub fn load_or_default(&self) -> StorageResult<Snapshot> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Delete the stored snapshot, if any
    pub fn delete(&self) -> StorageResult<()> {
        let path = self.config.snapshot_path();
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::write_failure(e, path))?;
        }
        Ok(())
    }
}

/// Move an unreadable snapshot out of the way, best effort
///
/// Returns the backup path whether or not the rename succeeded.
fn quarantine(path: &Path) -> PathBuf {
    let backup_path = path.with_extension("json.corrupt.backup");
    if let Err(err) = fs::rename(path, &backup_path) {
        warn!(
            path = %path.display(),
            error = %err,
            "could not move corrupt snapshot aside"
        );
    }
    backup_path
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    // Temp file in the same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::write_failure(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::write_failure(e, temp_path.clone()))?;

    file.sync_all()
        .map_err(|e| StorageError::write_failure(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::ReplaceSnapshot {
        from: temp_path,
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sheet::Sheet;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = SnapshotPersistence::new(test_config(&temp_dir));

        // Initially no snapshot
        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_none());

        // Create and save a sheet
        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        sheet.add_sub_topic(topic_id, "Easy").unwrap();

        persistence.save(&sheet.to_snapshot()).unwrap();
        assert!(persistence.exists());
        assert!(persistence.snapshot_size().unwrap() > 0);

        // Load and verify
        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded.topics.len(), 1);
        assert_eq!(loaded.topics[0].title, "Arrays");
        assert_eq!(loaded.topics[0].sub_topics.len(), 1);
    }

    #[test]
    fn test_load_or_default_missing() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = SnapshotPersistence::new(test_config(&temp_dir));

        let snapshot = persistence.load_or_default().unwrap();
        assert!(snapshot.topics.is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_is_quarantined() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let persistence = SnapshotPersistence::new(config.clone());

        fs::write(config.snapshot_path(), b"{ not json").unwrap();

        // Treated as missing, original moved to a backup
        assert!(persistence.load().unwrap().is_none());
        assert!(!config.snapshot_path().exists());
        let backup = config.snapshot_path().with_extension("json.corrupt.backup");
        assert!(backup.exists());
    }

    #[test]
    fn test_snapshot_file_is_camel_case_json() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = SnapshotPersistence::new(test_config(&temp_dir));

        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        sheet.add_sub_topic(topic_id, "Easy").unwrap();
        persistence.save(&sheet.to_snapshot()).unwrap();

        let content = fs::read_to_string(persistence.config().snapshot_path()).unwrap();
        assert!(content.contains("\"topics\""));
        assert!(content.contains("\"subTopics\""));
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir
            .path()
            .join("a")
            .join("b")
            .join("c")
            .join("file.json");

        atomic_write(&nested_path, b"[]").unwrap();

        assert!(nested_path.exists());
        let content = fs::read_to_string(&nested_path).unwrap();
        assert_eq!(content, "[]");
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = SnapshotPersistence::new(test_config(&temp_dir));

        persistence.save(&Snapshot::default()).unwrap();
        assert!(persistence.exists());

        persistence.delete().unwrap();
        assert!(!persistence.exists());

        // Deleting a missing snapshot is fine
        persistence.delete().unwrap();
    }
}
