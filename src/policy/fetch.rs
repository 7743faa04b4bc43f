//! Fetch Orchestration Module
//!
//! Thin policies composing the cache store with caller-supplied async fetch
//! functions: cached search, market-hours-aware quote/timeseries fetch, and
//! fire-and-forget watchlist prefetch.
//!
//! Each cache operation holds the store lock; the fetch itself is awaited
//! with the lock released. There is deliberately no single-flight
//! de-duplication: concurrent misses for the same key each run their fetch
//! and the last completed write wins. The fetch contract requires
//! idempotence, so duplicates waste a request but stay safe.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{search_key, stock_key};
use crate::error::{CacheError, Result};
use crate::models::{Instrument, QuoteOutcome, SearchOutcome, Timeframe};
use crate::policy::market;
use crate::SharedCache;

// == Cached Search ==
/// Instrument search through the cache.
///
/// On a hit the cached results return immediately, flagged `from_cache`. On
/// a miss the fetch runs; success stores and returns fresh results, failure
/// surfaces as [`CacheError::Fetch`]. Stale search results are not useful,
/// so there is no fallback path here.
pub async fn cached_search<F, Fut>(
    cache: &SharedCache,
    query: &str,
    fetch: F,
) -> Result<SearchOutcome>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<Value>>,
{
    let key = search_key(query);

    {
        let mut store = cache.write().await;
        if let Some(results) = store.get(&key) {
            debug!(query, "search served from cache");
            return Ok(SearchOutcome {
                results,
                from_cache: true,
            });
        }
    }

    match fetch().await {
        Ok(results) => {
            let mut store = cache.write().await;
            let ttl = store.config().search_results_ttl_ms;
            store.set(&key, results.clone(), Some(ttl));
            Ok(SearchOutcome {
                results,
                from_cache: false,
            })
        }
        Err(err) => {
            warn!(query, %err, "search fetch failed");
            Err(CacheError::Fetch(err))
        }
    }
}

// == Cached Stock Data ==
/// Quote/timeseries fetch through the cache.
///
/// Outside market hours a valid cached entry is returned without
/// refetching. During the trading session cached data is treated as live
/// and a fresh fetch is preferred even inside the TTL window. If the fetch
/// fails and any cached payload exists, even an expired one, it is returned
/// flagged `stale` instead of an error.
pub async fn cached_stock_data<F, Fut>(
    cache: &SharedCache,
    instrument: &Instrument,
    timeframe: &Timeframe,
    fetch: F,
) -> Result<QuoteOutcome>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<Value>>,
{
    fetch_stock_data(cache, instrument, timeframe, fetch, market::is_market_open_now()).await
}

/// Quote policy with the market-session state passed in, so the decision
/// logic can be exercised independent of the wall clock.
async fn fetch_stock_data<F, Fut>(
    cache: &SharedCache,
    instrument: &Instrument,
    timeframe: &Timeframe,
    fetch: F,
    market_open: bool,
) -> Result<QuoteOutcome>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = anyhow::Result<Value>>,
{
    let key = stock_key(&instrument.id, &timeframe.range, &timeframe.interval);

    let fallback = {
        let mut store = cache.write().await;
        // Snapshot before get(): the read path lazily deletes expired
        // entries, and the fallback must survive that
        let fallback = store.peek(&key);
        let cached = store.get(&key);
        if !market_open {
            if let Some(data) = cached {
                debug!(symbol = %instrument.symbol, "quote served from cache, market closed");
                return Ok(QuoteOutcome {
                    data,
                    from_cache: true,
                    stale: false,
                });
            }
        }
        fallback
    };

    match fetch().await {
        Ok(data) => {
            let mut store = cache.write().await;
            let ttl = store.config().stock_data_ttl_ms;
            store.set(&key, data.clone(), Some(ttl));
            Ok(QuoteOutcome {
                data,
                from_cache: false,
                stale: false,
            })
        }
        Err(err) => match fallback {
            Some((data, _)) => {
                warn!(symbol = %instrument.symbol, %err, "quote fetch failed, returning cached data");
                Ok(QuoteOutcome {
                    data,
                    from_cache: true,
                    stale: true,
                })
            }
            None => Err(CacheError::Fetch(err)),
        },
    }
}

// == Watchlist Prefetch ==
/// Fires the quote fetch for every watch-listed instrument whose cache key
/// is absent or expired, without awaiting completion. Successful fetches
/// are stored with the stock TTL; failures are logged and swallowed.
/// Returns the number of fetches fired.
pub async fn prefetch_watchlist<F, Fut>(
    cache: &SharedCache,
    instruments: &[Instrument],
    timeframe: &Timeframe,
    fetch: F,
) -> usize
where
    F: Fn(Instrument) -> Fut,
    Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
{
    let mut fired = 0;

    for instrument in instruments {
        let key = stock_key(&instrument.id, &timeframe.range, &timeframe.interval);

        let already_fresh = {
            let store = cache.read().await;
            matches!(store.peek(&key), Some((_, true)))
        };
        if already_fresh {
            continue;
        }

        let future = fetch(instrument.clone());
        let cache = Arc::clone(cache);
        let symbol = instrument.symbol.clone();
        tokio::spawn(async move {
            match future.await {
                Ok(data) => {
                    let mut store = cache.write().await;
                    let ttl = store.config().stock_data_ttl_ms;
                    store.set(&key, data, Some(ttl));
                }
                Err(err) => warn!(symbol = %symbol, %err, "prefetch failed"),
            }
        });
        fired += 1;
    }

    fired
}
