//! Cache Statistics Module
//!
//! Tracks cache activity counters: hits, misses, sets, deletes, evictions
//! and the current memory-tier size.

use serde::Serialize;

// == Cache Stats ==
/// Aggregate cache counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of reads served from cache (either tier)
    pub hits: u64,
    /// Number of reads that found nothing fresh
    pub misses: u64,
    /// Number of writes
    pub sets: u64,
    /// Number of explicit deletes
    pub deletes: u64,
    /// Number of entries evicted by the LRU policy
    pub evictions: u64,
    /// Current number of entries in the memory tier
    pub size: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates new stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of reads served from cache: hits / (hits + misses).
    ///
    /// Returns 0.0 when no reads have occurred.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Hit Rate Display ==
    /// Hit rate as a one-decimal percentage string, `"0%"` before any read.
    pub fn hit_rate_display(&self) -> String {
        if self.hits + self.misses == 0 {
            "0%".to_string()
        } else {
            format!("{:.1}%", self.hit_rate() * 100.0)
        }
    }

    // == Recorders ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Increments the set counter.
    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    /// Increments the delete counter.
    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Size ==
    /// Updates the current memory-tier size.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    // == Reset ==
    /// Resets every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
