//! Fetch Policy Module
//!
//! Orchestration wrappers over the cache store: per-category keys and TTLs,
//! market-hours-aware freshness, stale-on-error fallback and watchlist
//! prefetching.

mod fetch;
pub mod market;

pub use fetch::{cached_search, cached_stock_data, prefetch_watchlist};
pub use market::{is_market_open_at, is_market_open_now};
