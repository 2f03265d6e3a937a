use crate::config::DEFAULT_FETCH_BATCH_SIZE;
use crate::error::Result;
use crate::source::ContentSource;
use crate::stats::IngestStats;
use log::{info, warn};
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tokio::task::JoinSet;
use vault_graph::{GraphBuilder, GraphSnapshot};

/// Turns the content of a [`ContentSource`] into a fresh [`GraphSnapshot`].
///
/// Bodies are fetched in sequential batches; fetches inside one batch run concurrently.
/// Dropping the future returned by [`GraphIngestor::build_snapshot`] aborts any fetch
/// still in flight.
#[derive(Clone)]
pub struct GraphIngestor {
    source: Arc<dyn ContentSource>,
    batch_size: usize,
}

impl GraphIngestor {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self::with_batch_size(source, DEFAULT_FETCH_BATCH_SIZE)
    }

    pub fn with_batch_size(source: Arc<dyn ContentSource>, batch_size: usize) -> Self {
        Self {
            source,
            batch_size: batch_size.max(1),
        }
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// List, fetch and parse the whole collection.
    ///
    /// Fails only when listing fails; unreadable documents become empty nodes.
    pub async fn build_snapshot(&self) -> Result<(GraphSnapshot, IngestStats)> {
        let start = Instant::now();
        let mut stats = IngestStats::new();

        let paths = self.source.list_documents().await?;
        info!("Rebuilding note graph from {} documents", paths.len());

        let bodies = self.fetch_all(&paths).await;

        let mut builder = GraphBuilder::new();
        for (path, body) in paths.into_iter().zip(bodies) {
            stats.documents += 1;
            match &body {
                None => stats.fetch_failures += 1,
                Some(text) if !text.trim().is_empty() => stats.with_content += 1,
                Some(_) => {}
            }
            builder.add_document(path, body);
        }

        let snapshot = builder.build(SystemTime::now());
        stats.notes = snapshot.node_count();
        stats.links = snapshot.edge_count();
        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            "Note graph ready: {} notes, {} links, {} fetch failures in {} ms",
            stats.notes, stats.links, stats.fetch_failures, stats.duration_ms
        );
        Ok((snapshot, stats))
    }

    /// Bodies in the same order as `paths`; `None` marks a failed fetch.
    async fn fetch_all(&self, paths: &[String]) -> Vec<Option<String>> {
        let mut bodies: Vec<Option<String>> = vec![None; paths.len()];

        for (batch_index, batch) in paths.chunks(self.batch_size).enumerate() {
            let offset = batch_index * self.batch_size;
            let mut tasks = JoinSet::new();

            for (i, path) in batch.iter().enumerate() {
                let source = Arc::clone(&self.source);
                let path = path.clone();
                tasks.spawn(async move {
                    let result = source.fetch_document(&path).await;
                    (offset + i, path, result)
                });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((slot, _, Ok(body))) => bodies[slot] = Some(body),
                    Ok((_, path, Err(err))) => {
                        warn!("Treating {path} as empty: {err}");
                    }
                    Err(err) => warn!("Fetch task failed: {err}"),
                }
            }
        }

        bodies
    }
}
