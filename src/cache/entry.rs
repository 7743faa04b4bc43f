//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.
//! An entry is also the record format persisted to the durable tier, so it
//! derives Serialize/Deserialize.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A single cached payload with its freshness metadata.
///
/// Validity invariant: an entry is valid iff `now - created_at < ttl_ms`.
/// Expired entries are never served as fresh; they may only surface through
/// the explicit stale-fallback path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached payload (opaque to the cache)
    pub data: Value,
    /// Insertion timestamp (Unix milliseconds), refreshed on every set
    pub created_at: u64,
    /// Validity window in milliseconds
    pub ttl_ms: u64,
    /// Last successful read (Unix milliseconds), drives LRU eviction
    pub last_accessed_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(data: Value, ttl_ms: u64) -> Self {
        let now = current_timestamp_ms();
        Self {
            data,
            created_at: now,
            ttl_ms,
            last_accessed_at: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once its full TTL has
    /// elapsed, i.e. when `age >= ttl_ms`.
    pub fn is_expired(&self) -> bool {
        self.age_ms() >= self.ttl_ms
    }

    // == Age ==
    /// Milliseconds elapsed since insertion.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.created_at)
    }

    // == Remaining TTL ==
    /// Remaining validity window in milliseconds, floored at zero.
    pub fn remaining_ttl_ms(&self) -> u64 {
        self.ttl_ms.saturating_sub(self.age_ms())
    }

    // == Touch ==
    /// Marks the entry as just accessed.
    pub fn touch(&mut self) {
        self.last_accessed_at = current_timestamp_ms();
    }

    // == Metadata ==
    /// Introspection snapshot for this entry. Does not mutate access time.
    pub fn metadata(&self) -> CacheMetadata {
        CacheMetadata {
            created_at: self.created_at,
            ttl_ms: self.ttl_ms,
            age_ms: self.age_ms(),
            remaining_ms: self.remaining_ttl_ms(),
            is_valid: !self.is_expired(),
        }
    }
}

// == Cache Metadata ==
/// Read-only view of an entry's freshness, returned by
/// [`CacheStore::metadata`](crate::cache::CacheStore::metadata).
#[derive(Debug, Clone, Serialize)]
pub struct CacheMetadata {
    /// Insertion timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Validity window in milliseconds
    pub ttl_ms: u64,
    /// Milliseconds elapsed since insertion
    pub age_ms: u64,
    /// Remaining validity, floored at zero
    pub remaining_ms: u64,
    /// Whether the entry is still within its TTL
    pub is_valid: bool,
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new(json!({"symbol": "TCS"}), 60_000);

        assert_eq!(entry.data, json!({"symbol": "TCS"}));
        assert_eq!(entry.ttl_ms, 60_000);
        assert_eq!(entry.created_at, entry.last_accessed_at);
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new(json!("v"), 50);

        assert!(!entry.is_expired());
        sleep(Duration::from_millis(80));
        assert!(entry.is_expired());
    }

    #[test]
    fn test_entry_zero_ttl_expires_immediately() {
        let entry = CacheEntry::new(json!("v"), 0);
        assert!(entry.is_expired());
    }

    #[test]
    fn test_remaining_ttl() {
        let entry = CacheEntry::new(json!("v"), 10_000);

        let remaining = entry.remaining_ttl_ms();
        assert!(remaining <= 10_000);
        assert!(remaining >= 9_000);
    }

    #[test]
    fn test_remaining_ttl_floors_at_zero() {
        let entry = CacheEntry::new(json!("v"), 10);

        sleep(Duration::from_millis(40));
        assert_eq!(entry.remaining_ttl_ms(), 0);
    }

    #[test]
    fn test_touch_updates_last_access() {
        let mut entry = CacheEntry::new(json!("v"), 60_000);
        let before = entry.last_accessed_at;

        sleep(Duration::from_millis(5));
        entry.touch();

        assert!(entry.last_accessed_at > before);
        // created_at is untouched
        assert_eq!(entry.metadata().created_at, entry.created_at);
    }

    #[test]
    fn test_metadata_snapshot() {
        let entry = CacheEntry::new(json!([1, 2, 3]), 60_000);
        let meta = entry.metadata();

        assert!(meta.is_valid);
        assert_eq!(meta.ttl_ms, 60_000);
        assert!(meta.age_ms < 1_000);
        assert!(meta.remaining_ms > 59_000);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = current_timestamp_ms();
        let entry = CacheEntry {
            data: json!("v"),
            created_at: now - 1_000,
            ttl_ms: 1_000,
            last_accessed_at: now,
        };

        // Expired exactly when age == ttl
        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[test]
    fn test_entry_serialization_roundtrip() {
        let entry = CacheEntry::new(json!({"close": [100.5, 101.2]}), 120_000);

        let raw = serde_json::to_string(&entry).unwrap();
        let parsed: CacheEntry = serde_json::from_str(&raw).unwrap();

        assert_eq!(parsed.data, entry.data);
        assert_eq!(parsed.created_at, entry.created_at);
        assert_eq!(parsed.ttl_ms, entry.ttl_ms);
        assert_eq!(parsed.last_accessed_at, entry.last_accessed_at);
    }
}
