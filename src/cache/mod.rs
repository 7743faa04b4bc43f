//! Cache Module
//!
//! Two-tier caching with TTL expiry, LRU eviction and durable persistence.

mod entry;
mod key;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry, CacheMetadata};
pub use key::{canonical_string, fundamentals_key, make_key, search_key, stock_key};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;
