//! Persistence failure taxonomy
//!
//! The snapshot write path fails in a few ways the user can act on (full
//! disk, bad permissions) and a few they cannot. Each gets its own variant
//! so the warning the store logs names the actual problem, and
//! [`StorageError::user_hint`] supplies the fix when there is one.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias for snapshot persistence operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A failed snapshot read, write, or replace
#[derive(Error, Debug)]
pub enum StorageError {
    /// The data directory could not be created
    #[error("could not create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot path is not accessible to this process
    #[error("no permission to access '{path}'")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The disk or quota is exhausted
    #[error("disk full while writing '{path}'")]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot file exists but could not be read
    #[error("could not read snapshot '{path}': {source}")]
    ReadSnapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The snapshot bytes could not be written
    #[error("could not write snapshot '{path}': {source}")]
    WriteSnapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sheet could not be serialized
    #[error("could not serialize the sheet: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The final rename onto the snapshot path failed
    #[error("could not move '{from}' into place at '{to}': {source}")]
    ReplaceSnapshot {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Classify an I/O failure from the write path against the file it touched
    pub fn write_failure(source: io::Error, path: PathBuf) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            StorageError::PermissionDenied { path, source }
        } else if looks_like_full_disk(&source) {
            StorageError::DiskFull { path, source }
        } else {
            StorageError::WriteSnapshot { path, source }
        }
    }

    /// A short hint for conditions the user can fix themselves
    pub fn user_hint(&self) -> Option<&'static str> {
        match self {
            StorageError::DiskFull { .. } => Some("free up disk space"),
            StorageError::PermissionDenied { .. } => {
                Some("check permissions on the data directory")
            }
            StorageError::CreateDirectory { .. } => {
                Some("check that the data directory's parent is writable")
            }
            _ => None,
        }
    }
}

/// Quota errors have no stable `ErrorKind`, so match the rendered message too
fn looks_like_full_disk(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }
    error
        .to_string()
        .to_ascii_lowercase()
        .contains("quota exceeded")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failure_classifies_permission_denied() {
        let err = StorageError::write_failure(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            PathBuf::from("/data/prep-sheet-storage.json"),
        );

        assert!(matches!(err, StorageError::PermissionDenied { .. }));
        assert_eq!(
            err.user_hint(),
            Some("check permissions on the data directory")
        );
    }

    #[test]
    fn test_write_failure_classifies_full_disk() {
        let full = StorageError::write_failure(
            io::Error::new(io::ErrorKind::StorageFull, "no space left on device"),
            PathBuf::from("/data/prep-sheet-storage.json"),
        );
        assert!(matches!(full, StorageError::DiskFull { .. }));
        assert_eq!(full.user_hint(), Some("free up disk space"));

        let quota = StorageError::write_failure(
            io::Error::other("Disk quota exceeded"),
            PathBuf::from("/data/prep-sheet-storage.json"),
        );
        assert!(matches!(quota, StorageError::DiskFull { .. }));
    }

    #[test]
    fn test_write_failure_fallback_is_write_snapshot() {
        let err = StorageError::write_failure(
            io::Error::other("interrupted"),
            PathBuf::from("/data/prep-sheet-storage.json"),
        );

        assert!(matches!(err, StorageError::WriteSnapshot { .. }));
        assert!(err.user_hint().is_none());
    }

    #[test]
    fn test_display_names_the_path() {
        let err = StorageError::write_failure(
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            PathBuf::from("/data/prep-sheet-storage.json"),
        );

        assert!(err.to_string().contains("/data/prep-sheet-storage.json"));
    }
}
