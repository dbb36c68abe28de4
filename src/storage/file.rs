//! File Store Module
//!
//! Persists the cache store as a single JSON object in one file, rewritten
//! wholesale on every save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::storage::{LoadStatus, Loaded, Store, StoreAccessor};

// == File Store ==
/// Store accessor backed by one JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    // == Constructors ==
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_file_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Try Load ==
    /// Reads and parses the backing file, surfacing every failure.
    pub fn try_load(&self) -> Result<Store> {
        let contents = fs::read(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_slice(&contents).map_err(|source| self.parse_error(source))?;
        let Value::Object(entries) = value else {
            return Err(StoreError::NotAnObject {
                path: self.path.clone(),
            });
        };
        Ok(self.decode_records(entries))
    }

    /// Decodes each record on its own, skipping the ones that are malformed.
    fn decode_records(&self, entries: Map<String, Value>) -> Store {
        entries
            .into_iter()
            .filter_map(|(key, raw)| match serde_json::from_value(raw) {
                Ok(record) => Some((key, record)),
                Err(err) => {
                    warn!(
                        path = %self.path.display(),
                        key = %key,
                        error = %err,
                        "Skipping malformed cache record"
                    );
                    None
                }
            })
            .collect()
    }

    // == Try Save ==
    /// Serializes `store` and overwrites the backing file with it.
    pub fn try_save(&self, store: &Store) -> Result<()> {
        let contents = serde_json::to_vec(store).map_err(StoreError::Serialize)?;
        fs::write(&self.path, contents).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn parse_error(&self, source: serde_json::Error) -> StoreError {
        StoreError::Parse {
            path: self.path.clone(),
            source,
        }
    }

    /// Creates the directory holding the backing file, one level only.
    fn ensure_directory(&self) {
        let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) else {
            return;
        };
        if dir.is_dir() {
            return;
        }
        match fs::create_dir(dir) {
            Ok(()) => debug!(dir = %dir.display(), "Created cache directory"),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
            Err(err) => warn!(
                dir = %dir.display(),
                error = %err,
                "Failed to create cache directory"
            ),
        }
    }
}

impl StoreAccessor for FileStore {
    /// Loads the store, recovering every failure into an empty store.
    ///
    /// When the file is missing, the containing directory is created so the
    /// next save can succeed.
    fn load_with_status(&self) -> Loaded {
        let err = match self.try_load() {
            Ok(store) => return Loaded::fresh(store),
            Err(err) => err,
        };

        let status = match &err {
            e if e.is_not_found() => LoadStatus::Missing,
            StoreError::Io { .. } => LoadStatus::Unreadable,
            _ => LoadStatus::Corrupt,
        };

        if status == LoadStatus::Missing {
            debug!(path = %self.path.display(), "Cache file not found, starting empty");
            self.ensure_directory();
        } else {
            warn!(
                path = %self.path.display(),
                error = %err,
                "Cache file could not be loaded, starting empty"
            );
        }

        Loaded::recovered(status)
    }

    fn save(&self, store: &Store) -> bool {
        match self.try_save(store) {
            Ok(()) => true,
            Err(err) => {
                error!(
                    path = %self.path.display(),
                    entries = store.len(),
                    error = %err,
                    "Failed to write cache file"
                );
                false
            }
        }
    }
}
