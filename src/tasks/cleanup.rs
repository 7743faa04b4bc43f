//! TTL Cleanup Task
//!
//! Background task that periodically prunes expired cache entries. Lazy
//! expiry on read already keeps stale data from being served; this sweep
//! bounds growth from entries written once and never re-read.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::SharedCache;

/// Spawns a background task that periodically removes expired entries.
///
/// Runs forever, sleeping `interval` between sweeps; each sweep takes the
/// store write lock only for the duration of the prune. Returns a
/// `JoinHandle` so the owner can abort the task on shutdown.
pub fn spawn_cleanup_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut store = cache.write().await;
                store.cleanup()
            };

            if removed > 0 {
                info!(removed, "TTL cleanup removed expired entries");
            } else {
                debug!("TTL cleanup found no expired entries");
            }
        }
    })
}
