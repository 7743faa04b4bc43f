//! Durable Storage Module
//!
//! The durable tier behind the in-memory cache: a key-value store that
//! survives process restarts. The tier is a trait so the backend can be
//! swapped (files, embedded database, remote KV) without touching the
//! cache store or any call site.

mod file;
mod memory;

pub use file::FileTier;
pub use memory::MemoryTier;

// == Durable Tier Trait ==
/// A durable key-value store holding serialized cache entries.
///
/// Keys arriving here are already namespaced by the cache store (storage
/// prefix + cache key). Values are opaque serialized records; parsing and
/// validity checks belong to the caller.
///
/// Implementations take `&self` and use interior mutability where needed,
/// since the cache store shares the tier behind a single mutable handle.
pub trait DurableTier: Send + Sync + std::fmt::Debug {
    /// Reads the raw record stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Writes `value` under `key`, overwriting any previous record.
    fn save(&self, key: &str, value: &str) -> std::io::Result<()>;

    /// Removes the record under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);

    /// Lists every key currently stored.
    fn keys(&self) -> Vec<String>;
}
