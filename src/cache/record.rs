//! Cache Record Module
//!
//! Defines the persisted shape of a single cache record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::Timestamp;

// == Cache Record ==
/// A single cached value and the instant after which it is stale.
///
/// Serialized as `{"expires": "<numeral>", "data": <any JSON>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Absolute expiry (Unix seconds), or the `-1` sentinel
    pub expires: Timestamp,
    /// The stored value, never inspected by the cache; absent loads as `null`
    #[serde(default)]
    pub data: Value,
}

impl CacheRecord {
    // == Constructor ==
    pub fn new(data: Value, expires: Timestamp) -> Self {
        Self { expires, data }
    }

    // == Is Stale ==
    /// Checks if the record is stale right now.
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(&Timestamp::now())
    }

    /// Checks staleness against an explicit clock reading.
    ///
    /// Boundary condition: a record is stale once `now >= expires`, so a record
    /// expiring at the current second is already stale. The `-1` sentinel is
    /// stale for every non-negative `now`.
    pub fn is_stale_at(&self, now: &Timestamp) -> bool {
        self.expires.is_reached_at(now)
    }
}
