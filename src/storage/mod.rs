//! Storage Module
//!
//! The store accessor layer: loads the whole cache mapping and writes it back
//! wholesale. Accessors keep no state between calls that the engine relies
//! on; every operation is an independent load/mutate/save cycle.
//!
//! There is no locking. Two handles (or processes) on the same backing file
//! can interleave their load and save steps, and the last save wins.

mod file;
mod memory;

use std::collections::BTreeMap;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::cache::CacheRecord;

/// The full persisted state: cache key to record.
pub type Store = BTreeMap<String, CacheRecord>;

// == Load Status ==
/// How a load went. Every status other than `Loaded` comes with an empty store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The store was read and parsed
    Loaded,
    /// There was nothing to read yet
    Missing,
    /// The content was not a valid store
    Corrupt,
    /// The backing store exists but could not be read
    Unreadable,
}

impl LoadStatus {
    pub fn is_recovered(self) -> bool {
        self != LoadStatus::Loaded
    }
}

/// A store together with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub store: Store,
    pub status: LoadStatus,
}

impl Loaded {
    pub fn fresh(store: Store) -> Self {
        Self {
            store,
            status: LoadStatus::Loaded,
        }
    }

    pub fn recovered(status: LoadStatus) -> Self {
        Self {
            store: Store::new(),
            status,
        }
    }
}

// == Store Accessor ==
/// Whole-store persistence used by the cache engine.
///
/// Neither method may fail: loads recover to an empty store and saves report
/// failure as `false`, logging the cause.
pub trait StoreAccessor {
    /// Loads the store, reporting whether it had to be recovered.
    fn load_with_status(&self) -> Loaded;

    /// Overwrites the persisted store with `store`.
    fn save(&self, store: &Store) -> bool;

    fn load(&self) -> Store {
        self.load_with_status().store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovered_load_is_empty() {
        let loaded = Loaded::recovered(LoadStatus::Corrupt);
        assert!(loaded.store.is_empty());
        assert!(loaded.status.is_recovered());
        assert!(!LoadStatus::Loaded.is_recovered());
    }
}
