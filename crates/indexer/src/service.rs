use crate::config::RefreshConfig;
use crate::error::{IndexerError, Result};
use crate::ingest::GraphIngestor;
use crate::source::ContentSource;
use crate::stats::IngestStats;
use log::debug;
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant, SystemTime};
use tokio::sync::{watch, Mutex as TokioMutex};
use vault_graph::{unix_ms, GraphSnapshot};

/// Rebuild bookkeeping, published after every attempt
#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
pub struct RefreshHealth {
    pub rebuilding: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_success_unix_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    pub consecutive_failures: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_stats: Option<IngestStats>,
}

/// Result of a successful [`GraphService::rebuild`]
#[derive(Debug, Clone)]
pub struct RebuildOutcome {
    pub snapshot: Arc<GraphSnapshot>,
    /// `None` when the call waited on a rebuild that was already running
    pub stats: Option<IngestStats>,
}

impl RebuildOutcome {
    #[must_use]
    pub fn coalesced(&self) -> bool {
        self.stats.is_none()
    }
}

/// Owner of the current graph snapshot.
///
/// Readers take an `Arc` to whatever is published; a rebuild assembles the next snapshot
/// off to the side and swaps it in at once, so queries never see a partial graph.
pub struct GraphService {
    ingestor: GraphIngestor,
    rebuild_timeout: Duration,
    current: RwLock<Arc<GraphSnapshot>>,
    rebuild_lock: TokioMutex<()>,
    /// Error of the most recent rebuild, `None` after a success or while one runs
    last_failure: Mutex<Option<String>>,
    health_tx: watch::Sender<RefreshHealth>,
}

impl GraphService {
    pub fn new(source: Arc<dyn ContentSource>, config: &RefreshConfig) -> Self {
        let (health_tx, _) = watch::channel(RefreshHealth::default());
        Self {
            ingestor: GraphIngestor::with_batch_size(source, config.fetch_batch_size),
            rebuild_timeout: config.rebuild_timeout,
            current: RwLock::new(Arc::new(GraphSnapshot::empty())),
            rebuild_lock: TokioMutex::new(()),
            last_failure: Mutex::new(None),
            health_tx,
        }
    }

    /// The snapshot published most recently (empty before the first successful rebuild)
    #[must_use]
    pub fn snapshot(&self) -> Arc<GraphSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub fn health(&self) -> RefreshHealth {
        self.health_tx.borrow().clone()
    }

    #[must_use]
    pub fn health_stream(&self) -> watch::Receiver<RefreshHealth> {
        self.health_tx.subscribe()
    }

    /// Rebuild the graph from the source and publish it.
    ///
    /// On failure or timeout the previously published snapshot stays current. A call made
    /// while another rebuild runs waits for it and shares its result: the published
    /// snapshot on success, [`IndexerError::RebuildFailed`] when it failed.
    pub async fn rebuild(&self) -> Result<RebuildOutcome> {
        let _guard = match self.rebuild_lock.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("Rebuild already in progress; waiting for it");
                let _waited = self.rebuild_lock.lock().await;
                let failure = self.last_failure().clone();
                if let Some(message) = failure {
                    return Err(IndexerError::RebuildFailed(message));
                }
                return Ok(RebuildOutcome {
                    snapshot: self.snapshot(),
                    stats: None,
                });
            }
        };

        *self.last_failure() = None;
        self.health_tx.send_modify(|h| h.rebuilding = true);
        let start = Instant::now();

        let result = match tokio::time::timeout(
            self.rebuild_timeout,
            self.ingestor.build_snapshot(),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(IndexerError::RebuildTimedOut(self.rebuild_timeout)),
        };
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match result {
            Ok((snapshot, stats)) => {
                let snapshot = Arc::new(snapshot);
                self.publish(Arc::clone(&snapshot));
                self.health_tx.send_modify(|h| {
                    h.rebuilding = false;
                    h.last_success_unix_ms = Some(unix_ms(SystemTime::now()));
                    h.last_error = None;
                    h.consecutive_failures = 0;
                    h.last_duration_ms = Some(duration_ms);
                    h.last_stats = Some(stats.clone());
                });
                Ok(RebuildOutcome {
                    snapshot,
                    stats: Some(stats),
                })
            }
            Err(err) => {
                debug!("Graph rebuild failed, keeping previous snapshot: {err}");
                *self.last_failure() = Some(err.to_string());
                self.health_tx.send_modify(|h| {
                    h.rebuilding = false;
                    h.last_error = Some(err.to_string());
                    h.consecutive_failures = h.consecutive_failures.saturating_add(1);
                    h.last_duration_ms = Some(duration_ms);
                });
                Err(err)
            }
        }
    }

    fn last_failure(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.last_failure.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, snapshot: Arc<GraphSnapshot>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }
}
