//! Error types for the cache backing store
//!
//! The public cache operations never surface these: every failure is recovered
//! into an empty store or a `false` result. They are visible only through the
//! fallible `try_load` / `try_save` primitives and in log output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

// == Store Error Enum ==
/// Why the backing file could not be read or written.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The file could not be read or written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file exists but does not hold a valid cache store
    #[error("Malformed cache file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file holds valid JSON whose top level is not an object
    #[error("Cache file {} does not contain a JSON object", .path.display())]
    NotAnObject { path: PathBuf },

    /// The in-memory store could not be encoded
    #[error("Failed to serialize cache store: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    /// Returns true if the failure means the file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

// == Result Type Alias ==
/// Convenience Result type for backing store primitives.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let missing = StoreError::Io {
            path: PathBuf::from("/nowhere/cache.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let denied = StoreError::Io {
            path: PathBuf::from("/nowhere/cache.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "nope"),
        };
        assert!(missing.is_not_found());
        assert!(!denied.is_not_found());
    }

    #[test]
    fn test_display_includes_path() {
        let err = StoreError::NotAnObject {
            path: PathBuf::from("cache.json"),
        };
        assert_eq!(
            err.to_string(),
            "Cache file cache.json does not contain a JSON object"
        );
    }
}
