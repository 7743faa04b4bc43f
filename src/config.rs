//! Configuration Module
//!
//! Compile-time-fixed cache parameters: the per-category TTL table, the
//! memory-tier size limit and the durable-storage namespace. There is no
//! environment or file loading; callers that need different values (tests,
//! mostly) construct their own.

/// Cache configuration parameters.
///
/// TTLs are per data category, mirroring how often each kind of payload
/// actually changes: live quote data is refetched aggressively, search
/// results and fundamentals much less so.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the memory tier can hold
    pub max_entries: usize,
    /// Default TTL in milliseconds for entries without an explicit TTL
    pub default_ttl_ms: u64,
    /// TTL for quote/timeseries data (short - live data)
    pub stock_data_ttl_ms: u64,
    /// TTL for instrument search results
    pub search_results_ttl_ms: u64,
    /// TTL for fundamentals records (rarely change)
    pub fundamentals_ttl_ms: u64,
    /// TTL for chart data
    pub chart_data_ttl_ms: u64,
    /// Namespace prefix for keys in the durable tier
    pub storage_prefix: String,
}

impl CacheConfig {
    /// Returns the default config with a different entry limit.
    ///
    /// Mainly for tests that exercise eviction with a small cache.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 100,
            default_ttl_ms: 5 * 60 * 1000,
            stock_data_ttl_ms: 2 * 60 * 1000,
            search_results_ttl_ms: 10 * 60 * 1000,
            fundamentals_ttl_ms: 15 * 60 * 1000,
            chart_data_ttl_ms: 5 * 60 * 1000,
            storage_prefix: "marketcache_".to_string(),
        }
    }
}
