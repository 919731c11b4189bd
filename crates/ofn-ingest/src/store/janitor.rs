//! Background expiry sweeps

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::DedupeStore;

/// Owns the task that periodically purges expired offers from a store.
///
/// The first sweep runs one interval after [`Janitor::start`]. Expiry is
/// approximate: an entry can outlive its retention window by up to one
/// interval. Dropping the janitor cancels the task; [`Janitor::shutdown`]
/// also waits for it to finish.
#[derive(Debug)]
pub struct Janitor {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Janitor {
    /// Spawn the sweep task on the current tokio runtime.
    pub fn start(store: Arc<DedupeStore>, every: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(interval_secs = every.as_secs(), "Offer janitor started");

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let removed = store.purge_expired(Utc::now());
                        debug!(removed, remaining = store.len(), "Expiry sweep complete");
                    }
                }
            }

            info!("Offer janitor stopped");
        });

        Self { cancel, handle }
    }

    /// Whether the sweep task has exited
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop sweeping and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Err(e) = (&mut self.handle).await {
            warn!("Offer janitor exited abnormally: {}", e);
        }
    }
}

impl Drop for Janitor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
