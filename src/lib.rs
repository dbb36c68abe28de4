//! Satchel - A small persistent key-value cache
//!
//! Records live in a single JSON file, each with an absolute expiry. Stale
//! records are evicted lazily when read. Every operation reloads the whole
//! file and, if it changed anything, rewrites it; there is no locking between
//! handles or processes.

pub mod cache;
pub mod config;
pub mod error;
pub mod storage;

pub use cache::{CacheRecord, CacheStats, Satchel, Timestamp};
pub use config::Config;
pub use error::StoreError;
pub use storage::{FileStore, LoadStatus, Loaded, MemoryStore, Store, StoreAccessor};
