//! Periodic removal of expired short links.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::domain::repositories::UrlRepository;

/// Spawns the background sweep that deletes expired records.
///
/// The first sweep runs immediately, then one every `every`. Sweep errors
/// are logged and the loop keeps going; the task exits when `shutdown`
/// flips or its sender is dropped.
pub fn spawn_cleanup(
    repo: Arc<dyn UrlRepository>,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("cleanup task shutting down");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    match repo.delete_expired().await {
                        Ok(deleted) if deleted > 0 => {
                            info!(deleted, "removed expired short links");
                        }
                        Ok(_) => {}
                        Err(e) => error!(error = %e, "cleanup sweep failed"),
                    }
                }
            }
        }
    })
}
