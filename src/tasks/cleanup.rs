//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired tag cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedTagCache;

/// Spawns a task that calls [`TagCache::cleanup`] every `interval`.
///
/// Each sweep holds the cache's write lock, so it never interleaves with a
/// lookup or an invalidation. The first sweep runs one full interval after
/// spawning.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it during shutdown.
///
/// # Example
/// ```ignore
/// let cache = TagCache::new(&CacheConfig::default()).into_shared();
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
///
/// [`TagCache::cleanup`]: crate::cache::TagCache::cleanup
pub fn spawn_cleanup_task(cache: SharedTagCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(
            "Starting tag cache cleanup task with interval of {:?}",
            interval
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup();
                (removed, cache_guard.len())
            };

            debug!(removed, remaining, "Cleanup tick finished");
        }
    })
}
