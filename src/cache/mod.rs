//! Cache Module
//!
//! The cache engine, the persisted record shape and the timestamp domain
//! expiry arithmetic runs in.

mod engine;
mod record;
mod stats;
mod timestamp;


// Re-export public types
pub use engine::Satchel;
pub use record::CacheRecord;
pub use stats::CacheStats;
pub use timestamp::{
    compute_expiry, current_timestamp_secs, Timestamp, INVALIDATED, MILLIS_PER_MINUTE,
};
