//! Background Cleanup Task
//!
//! Periodically purges expired cache entries and elapsed rate windows so idle
//! keys do not hold memory until the next write.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::BoundedCache;
use crate::clock::Clock;
use crate::limiter::{RateLimiter, SweepMode};

/// Spawns a task that purges `cache` every `cleanup_interval_secs` seconds.
///
/// A limiter in [`SweepMode::Lazy`] is swept on the same tick with its
/// configured window. An [`SweepMode::EveryCall`] limiter already sweeps on
/// each call and is left alone.
///
/// Returns the task handle so it can be aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_cleanup_task(state.cache.clone(), state.limiter.clone(), 60);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_cleanup_task<V, C, L>(
    cache: Arc<BoundedCache<V, C>>,
    limiter: Arc<RateLimiter<L>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()>
where
    V: Clone + Send + 'static,
    C: Clock,
    L: Clock,
{
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let purged = cache.purge_expired();
            let swept = match limiter.config().sweep {
                SweepMode::Lazy => limiter.sweep(limiter.config().window()),
                SweepMode::EveryCall => 0,
            };

            if purged > 0 || swept > 0 {
                info!(purged, swept, "cleanup removed expired state");
            } else {
                debug!("cleanup: nothing expired");
            }
        }
    })
}
