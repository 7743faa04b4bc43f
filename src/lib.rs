//! MarketCache - two-tier market-data cache
//!
//! Read-through/write-through caching for a stock-market dashboard: an
//! in-memory tier with TTL expiry and LRU eviction, mirrored to a durable
//! tier that survives restarts, plus fetch policies adding stale-on-error
//! fallback and a market-hours-aware freshness rule for live quote data.
//!
//! The cache is an explicitly constructed instance, not a global: build a
//! [`CacheStore`] over a [`DurableTier`] at your composition root, wrap it
//! with [`shared`] and hand the handle to whatever needs caching.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
pub mod storage;
pub mod tasks;

use std::sync::Arc;

use tokio::sync::RwLock;

pub use cache::{CacheEntry, CacheMetadata, CacheStats, CacheStore};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use models::{Instrument, QuoteOutcome, SearchOutcome, Timeframe};
pub use policy::{cached_search, cached_stock_data, prefetch_watchlist};
pub use storage::{DurableTier, FileTier, MemoryTier};
pub use tasks::spawn_cleanup_task;

/// Shared handle to a cache store, used by policies and background tasks.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Wraps a store for shared use.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}
