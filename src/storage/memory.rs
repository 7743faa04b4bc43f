//! In-Process Durable Tier
//!
//! A `HashMap` behind an `Arc<Mutex<..>>` standing in for real durable
//! storage. Clones share the same underlying map, which lets tests simulate
//! a process restart: build a fresh `CacheStore` over a clone of the tier
//! and the "persisted" records are still there.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::DurableTier;

// == Memory Tier ==
/// Shared in-process key-value store implementing [`DurableTier`].
#[derive(Debug, Clone, Default)]
pub struct MemoryTier {
    records: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryTier {
    /// Creates a new empty tier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.lock().expect("tier lock poisoned").len()
    }

    /// Returns true if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrites the raw record under `key`, bypassing serialization.
    ///
    /// Test hook for planting malformed records.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.records
            .lock()
            .expect("tier lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}

impl DurableTier for MemoryTier {
    fn load(&self, key: &str) -> Option<String> {
        self.records
            .lock()
            .expect("tier lock poisoned")
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, value: &str) -> std::io::Result<()> {
        self.records
            .lock()
            .expect("tier lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.records.lock().expect("tier lock poisoned").remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.records
            .lock()
            .expect("tier lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}
