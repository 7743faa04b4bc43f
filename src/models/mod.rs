//! Data Models
//!
//! Domain types shared by the fetch policies: watch-listed instruments, the
//! requested chart timeframe, and the policy outcome types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Instrument ==
/// A tradable instrument as known to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    /// Backend identifier, used in cache keys
    pub id: String,
    /// Display ticker symbol
    pub symbol: String,
}

impl Instrument {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
        }
    }
}

// == Timeframe ==
/// Range and sampling interval for a timeseries request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    /// Lookback range, e.g. `1mo`, `6mo`, `1y`
    pub range: String,
    /// Bar interval, e.g. `1d`, `1wk`
    pub interval: String,
}

impl Timeframe {
    pub fn new(range: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            range: range.into(),
            interval: interval.into(),
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::new("1mo", "1d")
    }
}

// == Search Outcome ==
/// Result of a cached instrument search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Search results payload
    pub results: Value,
    /// Whether the results came from cache rather than a fresh fetch
    pub from_cache: bool,
}

// == Quote Outcome ==
/// Result of a cached quote/timeseries fetch.
#[derive(Debug, Clone)]
pub struct QuoteOutcome {
    /// Timeseries payload
    pub data: Value,
    /// Whether the data came from cache rather than a fresh fetch
    pub from_cache: bool,
    /// True when the data is expired fallback served because the fetch
    /// failed
    pub stale: bool,
}
