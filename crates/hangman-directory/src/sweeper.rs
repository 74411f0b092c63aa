//! Background eviction.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::{Directory, WordSource};

/// Smallest accepted sweep period.
const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Spawns a task that calls [`Directory::expire_stale`] every `period`.
///
/// The task holds only a weak reference and exits once the last `Arc`
/// to the directory is dropped. Abort the returned handle to stop it
/// sooner. A late sweep is skipped rather than replayed.
///
/// Must be called from within a Tokio runtime.
pub fn spawn_sweeper<W: WordSource>(
    directory: &Arc<Directory<W>>,
    period: Duration,
) -> JoinHandle<()> {
    let period = if period < MIN_PERIOD {
        tracing::warn!(?period, "sweep period too short, clamping to 1s");
        MIN_PERIOD
    } else {
        period
    };
    let directory: Weak<Directory<W>> = Arc::downgrade(directory);

    tokio::spawn(async move {
        let mut ticker = time::interval_at(time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let Some(directory) = directory.upgrade() else {
                tracing::debug!("directory dropped, sweeper exiting");
                break;
            };
            let expired = directory.expire_stale().await;
            if !expired.is_empty() {
                tracing::debug!(count = expired.len(), "sweep removed games");
            }
        }
    })
}
