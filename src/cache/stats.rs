//! Cache Statistics Module
//!
//! In-process counters for one cache handle. Nothing here is persisted.

use serde::Serialize;

// == Cache Stats ==
/// Tracks what a cache handle has observed since it was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Reads that returned a live record
    pub hits: u64,
    /// Reads that found nothing usable (absent or stale)
    pub misses: u64,
    /// Stale records removed by a read or a purge
    pub evictions: u64,
    /// Writes that reached the backing store
    pub writes: u64,
    /// Saves the backing store rejected
    pub failed_saves: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if nothing has been read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Evictions ==
    /// Adds `count` to the eviction counter.
    pub fn record_evictions(&mut self, count: u64) {
        self.evictions += count;
    }

    // == Record Write ==
    /// Increments the write counter.
    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    // == Record Failed Save ==
    /// Increments the failed save counter.
    pub fn record_failed_save(&mut self) {
        self.failed_saves += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.writes, 0);
        assert_eq!(stats.failed_saves, 0);
    }

    #[test]
    fn test_hit_rate_no_reads() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_evictions_accumulates() {
        let mut stats = CacheStats::new();
        stats.record_evictions(1);
        stats.record_evictions(3);
        assert_eq!(stats.evictions, 4);
    }

    #[test]
    fn test_writes_and_failed_saves() {
        let mut stats = CacheStats::new();
        stats.record_write();
        stats.record_failed_save();
        stats.record_failed_save();
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.failed_saves, 2);
    }
}
