//! Cache Store Module
//!
//! The cache manager core: read-through/write-through caching over two
//! tiers, a process-lifetime HashMap and a durable key-value store that
//! survives restarts. Expiry is lazy (checked on read), eviction is strict
//! LRU by last access, and every memory write/delete is mirrored to the
//! durable tier so the tiers only diverge across a restart, until the first
//! read rehydrates an entry.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheMetadata, CacheStats, LruTracker};
use crate::config::CacheConfig;
use crate::storage::{DurableTier, FileTier, MemoryTier};

// == Cache Store ==
/// Two-tier cache with TTL expiry and LRU eviction.
#[derive(Debug)]
pub struct CacheStore {
    /// Memory tier
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Activity counters
    stats: CacheStats,
    /// TTL table, size limit, storage prefix
    config: CacheConfig,
    /// Durable tier
    durable: Box<dyn DurableTier>,
}

impl CacheStore {
    // == Constructors ==
    /// Creates a store over the given durable tier.
    pub fn new(config: CacheConfig, durable: Box<dyn DurableTier>) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            config,
            durable,
        }
    }

    /// Creates a store persisting to the platform cache directory.
    ///
    /// Falls back to an in-process tier when no cache directory can be
    /// determined, degrading to a memory-only cache.
    pub fn with_file_tier(config: CacheConfig) -> Self {
        match FileTier::new() {
            Some(tier) => Self::new(config, Box::new(tier)),
            None => {
                warn!("no cache directory available, durable tier is in-process only");
                Self::new(config, Box::new(MemoryTier::new()))
            }
        }
    }

    // == Get ==
    /// Retrieves the payload for `key`, or `None` on a miss.
    ///
    /// A valid memory entry is a hit and refreshes its access time. An
    /// expired memory entry is lazily removed. On a memory miss the durable
    /// tier is consulted: a valid record rehydrates into memory and counts
    /// as a hit, an expired or malformed record counts as a miss (expired
    /// records are deleted, malformed ones just logged). Never errors.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let mut lazily_expired = false;
        let mut fresh = None;
        if let Some(entry) = self.entries.get_mut(key) {
            if entry.is_expired() {
                lazily_expired = true;
            } else {
                entry.touch();
                fresh = Some(entry.data.clone());
            }
        }

        if let Some(data) = fresh {
            self.lru.touch(key);
            self.stats.record_hit();
            return Some(data);
        }

        if lazily_expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.set_size(self.entries.len());
        }

        // Memory miss: try the durable tier
        let namespaced = self.namespaced(key);
        if let Some(raw) = self.durable.load(&namespaced) {
            match serde_json::from_str::<CacheEntry>(&raw) {
                Ok(mut entry) if !entry.is_expired() => {
                    entry.touch();
                    let data = entry.data.clone();
                    self.entries.insert(key.to_string(), entry);
                    self.lru.touch(key);
                    self.stats.set_size(self.entries.len());
                    self.stats.record_hit();
                    return Some(data);
                }
                Ok(_) => self.durable.remove(&namespaced),
                Err(err) => {
                    warn!(key, %err, "malformed durable record, treating as miss");
                }
            }
        }

        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores `data` under `key` with the given TTL (default TTL if `None`).
    ///
    /// When the memory tier is full and the key is new, the entry with the
    /// oldest last access is evicted first, from both tiers. The durable
    /// write-through is best effort: a failure is logged and swallowed, the
    /// memory tier stays authoritative.
    pub fn set(&mut self, key: &str, data: Value, ttl_ms: Option<u64>) {
        let ttl_ms = ttl_ms.unwrap_or(self.config.default_ttl_ms);

        let is_new = !self.entries.contains_key(key);
        if is_new && self.entries.len() >= self.config.max_entries {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                let namespaced = self.namespaced(&evicted);
                self.durable.remove(&namespaced);
                self.stats.record_eviction();
                debug!(key = %evicted, "evicted least recently accessed entry");
            }
        }

        let entry = CacheEntry::new(data, ttl_ms);

        let namespaced = self.namespaced(key);
        match serde_json::to_string(&entry) {
            Ok(raw) => {
                if let Err(err) = self.durable.save(&namespaced, &raw) {
                    warn!(key, %err, "durable write failed, memory tier remains authoritative");
                }
            }
            Err(err) => {
                warn!(key, %err, "entry serialization failed, skipping durable write");
            }
        }

        self.entries.insert(key.to_string(), entry);
        self.lru.touch(key);
        self.stats.record_set();
        self.stats.set_size(self.entries.len());
    }

    // == Peek ==
    /// Non-mutating read of either tier, returning the payload and whether
    /// it is still valid. Expired data is returned (flagged invalid) so the
    /// stale-fallback path can use it. No statistics, no access-time update,
    /// no lazy deletion.
    pub fn peek(&self, key: &str) -> Option<(Value, bool)> {
        if let Some(entry) = self.entries.get(key) {
            return Some((entry.data.clone(), !entry.is_expired()));
        }
        let raw = self.durable.load(&self.namespaced(key))?;
        let entry: CacheEntry = serde_json::from_str(&raw).ok()?;
        let valid = !entry.is_expired();
        Some((entry.data, valid))
    }

    // == Delete ==
    /// Removes `key` from both tiers. Returns whether a memory entry
    /// existed.
    pub fn delete(&mut self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        self.lru.remove(key);
        let namespaced = self.namespaced(key);
        self.durable.remove(&namespaced);
        self.stats.record_delete();
        self.stats.set_size(self.entries.len());
        existed
    }

    // == Clear ==
    /// Removes every entry from both tiers and resets all counters.
    ///
    /// Only durable records under this store's prefix are touched, so
    /// unrelated data sharing the backend survives.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        for key in self.durable.keys() {
            if key.starts_with(&self.config.storage_prefix) {
                self.durable.remove(&key);
            }
        }
        self.stats.reset();
    }

    // == Metadata ==
    /// Freshness snapshot for a memory entry: age, remaining TTL (floored
    /// at zero) and validity. Does not update access time.
    pub fn metadata(&self, key: &str) -> Option<CacheMetadata> {
        self.entries.get(key).map(CacheEntry::metadata)
    }

    // == Cleanup ==
    /// Removes every expired memory entry, mirroring each removal to the
    /// durable tier. Returns the count removed.
    ///
    /// Lazy expiry on read already keeps stale data from being served; this
    /// sweep bounds growth from entries written once and never re-read.
    pub fn cleanup(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired.len();
        for key in expired {
            self.entries.remove(&key);
            self.lru.remove(&key);
            let namespaced = self.namespaced(&key);
            self.durable.remove(&namespaced);
        }

        self.stats.set_size(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_size(self.entries.len());
        stats
    }

    // == Accessors ==
    /// The configuration this store was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Current number of memory entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the memory tier is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lists all memory-tier keys (debugging aid).
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.config.storage_prefix, key)
    }
}
