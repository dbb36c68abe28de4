//! Cache Engine Module
//!
//! The public cache operations. Each call loads the whole store through the
//! accessor, inspects or mutates it in memory and, for mutating operations,
//! saves it back. Nothing loaded is kept between calls.

use std::sync::{Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{
    compute_expiry, current_timestamp_secs, CacheRecord, CacheStats, Timestamp, MILLIS_PER_MINUTE,
};
use crate::config::Config;
use crate::storage::{FileStore, Store, StoreAccessor};

// == Satchel ==
/// A persistent key-value cache with lazy, read-time expiry.
///
/// Staleness is never swept in the background: a stale record stays in the
/// backing store until it is read (or [`Satchel::purge_stale`] is called).
#[derive(Debug)]
pub struct Satchel<S = FileStore> {
    /// Backing store accessor
    store: S,
    /// Lifespan in minutes used when a call passes none
    default_lifespan_minutes: u64,
    /// Per-handle counters
    stats: Mutex<CacheStats>,
}

impl Satchel<FileStore> {
    // == Constructor ==
    /// Creates a cache backed by the file named in `config`.
    pub fn new(config: &Config) -> Self {
        Self::with_store(FileStore::from_config(config), config.default_lifespan_minutes)
    }
}

impl Default for Satchel<FileStore> {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl<S: StoreAccessor> Satchel<S> {
    /// Creates a cache over any store accessor.
    pub fn with_store(store: S, default_lifespan_minutes: u64) -> Self {
        Self {
            store,
            default_lifespan_minutes,
            stats: Mutex::new(CacheStats::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn default_lifespan_minutes(&self) -> u64 {
        self.default_lifespan_minutes
    }

    // == All ==
    /// Returns every record in the store, stale ones included.
    pub fn all(&self) -> Store {
        self.store.load()
    }

    // == Write ==
    /// Stores `data` under `id`, replacing any existing record.
    ///
    /// The record expires `lifespan` minutes (or the default) from now.
    /// Returns whether the store was saved; a value that cannot be encoded as
    /// JSON is not written and yields `false`.
    pub fn write<T: Serialize + ?Sized>(&self, id: &str, data: &T, lifespan: Option<u64>) -> bool {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(err) => {
                warn!(key = id, error = %err, "Value could not be encoded, nothing written");
                return false;
            }
        };

        let mut store = self.store.load();
        let expires = self.expiry_for(lifespan);
        debug!(key = id, expires = %expires, "Writing cache record");
        store.insert(id.to_string(), CacheRecord::new(data, expires));

        let saved = self.persist(&store);
        if saved {
            self.record(CacheStats::record_write);
        }
        saved
    }

    // == Read ==
    /// Returns the value stored under `id`.
    ///
    /// Returns `None` if the key is absent or stale. A stale record is removed
    /// from the backing store before returning.
    pub fn read(&self, id: &str) -> Option<Value> {
        let mut store = self.store.load();
        match store.remove(id) {
            None => {
                self.record(CacheStats::record_miss);
                None
            }
            Some(record) if record.is_stale() => {
                debug!(key = id, expires = %record.expires, "Evicting stale cache record");
                if self.remove(id) {
                    self.record(|stats| stats.record_evictions(1));
                }
                self.record(CacheStats::record_miss);
                None
            }
            Some(record) => {
                self.record(CacheStats::record_hit);
                Some(record.data)
            }
        }
    }

    /// Reads the value under `id` and decodes it as `T`.
    ///
    /// A live value that does not decode as `T` is reported as `None` and
    /// left in place.
    pub fn read_as<T: DeserializeOwned>(&self, id: &str) -> Option<T> {
        let value = self.read(id)?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                debug!(key = id, error = %err, "Cached value has a different shape");
                None
            }
        }
    }

    // == Remove ==
    /// Deletes the record under `id`.
    ///
    /// Removing an absent key is not an error: the store is saved either way
    /// and the result is the save result.
    pub fn remove(&self, id: &str) -> bool {
        let mut store = self.store.load();
        store.remove(id);
        self.persist(&store)
    }

    // == Hydrate ==
    /// Pushes the expiry of an existing record to `lifespan` minutes from now.
    ///
    /// Returns `false` without saving if the key is absent.
    pub fn hydrate(&self, id: &str, lifespan: Option<u64>) -> bool {
        let expires = self.expiry_for(lifespan);
        self.update_expiry(id, expires)
    }

    // == Invalidate ==
    /// Marks an existing record stale with the `-1` sentinel, keeping its data.
    ///
    /// Returns `false` without saving if the key is absent.
    pub fn invalidate(&self, id: &str) -> bool {
        debug!(key = id, "Invalidating cache record");
        self.update_expiry(id, Timestamp::invalidated())
    }

    // == Expiry ==
    /// Returns the raw expiry of the record under `id`, stale or not.
    pub fn get_expiry(&self, id: &str) -> Option<Timestamp> {
        self.store.load().remove(id).map(|record| record.expires)
    }

    /// Stores `timestamp` verbatim as the expiry of an existing record.
    ///
    /// The value is neither offset from now nor validated. Returns `false`
    /// without saving if the key is absent.
    pub fn set_expiry(&self, id: &str, timestamp: impl Into<Timestamp>) -> bool {
        self.update_expiry(id, timestamp.into())
    }

    // == Purge Stale ==
    /// Removes every stale record in one load/save cycle.
    ///
    /// Runs only when called. Returns the number of records removed, or 0 if
    /// the store could not be saved.
    pub fn purge_stale(&self) -> usize {
        let mut store = self.store.load();
        let now = Timestamp::now();
        let before = store.len();
        store.retain(|_, record| !record.is_stale_at(&now));
        let removed = before - store.len();

        if removed == 0 || !self.persist(&store) {
            return 0;
        }
        debug!(removed, "Purged stale cache records");
        self.record(|stats| stats.record_evictions(removed as u64));
        removed
    }

    // == Stats ==
    /// Returns the counters collected by this handle.
    pub fn stats(&self) -> CacheStats {
        self.stats
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // == Helpers ==
    fn expiry_for(&self, lifespan: Option<u64>) -> Timestamp {
        let minutes = lifespan.unwrap_or(self.default_lifespan_minutes);
        compute_expiry(current_timestamp_secs(), u128::from(minutes) * MILLIS_PER_MINUTE)
    }

    fn update_expiry(&self, id: &str, expires: Timestamp) -> bool {
        let mut store = self.store.load();
        let Some(record) = store.get_mut(id) else {
            return false;
        };
        record.expires = expires;
        self.persist(&store)
    }

    fn persist(&self, store: &Store) -> bool {
        let saved = self.store.save(store);
        if !saved {
            self.record(CacheStats::record_failed_save);
        }
        saved
    }

    fn record(&self, update: impl FnOnce(&mut CacheStats)) {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        update(&mut *stats);
    }
}
