use crate::config::MAX_DURATION;
use crate::service::GraphService;
use log::{info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);
pub const MAX_REFRESH_INTERVAL: Duration = MAX_DURATION;

enum RefreshCommand {
    Shutdown,
}

/// Periodic full rebuild of a [`GraphService`].
///
/// The first rebuild happens one `interval` after start; the interval is clamped to
/// `1s..=`[`MAX_REFRESH_INTERVAL`]. Failures are logged and the loop keeps going; the next
/// tick is the retry. Dropping the last handle stops the loop.
#[derive(Clone)]
pub struct RefreshScheduler {
    inner: Arc<RefreshSchedulerInner>,
}

struct RefreshSchedulerInner {
    command_tx: mpsc::Sender<RefreshCommand>,
    interval: Duration,
}

impl RefreshScheduler {
    #[must_use]
    pub fn start(service: Arc<GraphService>, interval: Duration) -> Self {
        let interval = interval.clamp(MIN_REFRESH_INTERVAL, MAX_REFRESH_INTERVAL);
        let (command_tx, command_rx) = mpsc::channel(4);
        spawn_refresh_loop(service, interval, command_rx);

        Self {
            inner: Arc::new(RefreshSchedulerInner {
                command_tx,
                interval,
            }),
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// False once the loop has exited
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.inner.command_tx.is_closed()
    }

    pub async fn shutdown(&self) {
        let _ = self.inner.command_tx.send(RefreshCommand::Shutdown).await;
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        if Arc::strong_count(&self.inner) == 1 {
            let _ = self.inner.command_tx.try_send(RefreshCommand::Shutdown);
        }
    }
}

fn spawn_refresh_loop(
    service: Arc<GraphService>,
    interval: Duration,
    mut command_rx: mpsc::Receiver<RefreshCommand>,
) {
    tokio::spawn(async move {
        let start = Instant::now()
            .checked_add(interval)
            .unwrap_or_else(Instant::now);
        let mut ticker = time::interval_at(start, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = command_rx.recv() => {
                    match cmd {
                        Some(RefreshCommand::Shutdown) | None => break,
                    }
                }
                _ = ticker.tick() => {
                    match service.rebuild().await {
                        Ok(outcome) => {
                            if let Some(stats) = outcome.stats {
                                info!(
                                    "Scheduled refresh: {} notes, {} links",
                                    stats.notes, stats.links
                                );
                            }
                        }
                        Err(err) => {
                            let failures = service.health().consecutive_failures;
                            warn!("Scheduled refresh failed ({failures} in a row): {err}");
                        }
                    }
                }
            }
        }

        info!("Refresh scheduler stopped");
    });
}
