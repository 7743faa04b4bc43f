//! Error types for the cache subsystem
//!
//! Provides unified error handling using thiserror.
//!
//! Nothing in this taxonomy is fatal to a caller: durable-storage failures
//! are logged and swallowed inside the store (the memory tier stays
//! authoritative), and only fetch failures ever reach policy callers.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache subsystem.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A caller-supplied fetch function failed
    #[error("fetch failed: {0}")]
    Fetch(anyhow::Error),

    /// Durable tier read/write failure
    #[error("durable storage error: {0}")]
    Storage(String),

    /// Entry could not be serialized or deserialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache subsystem.
pub type Result<T> = std::result::Result<T, CacheError>;
