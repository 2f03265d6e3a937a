//! # Vault Indexer
//!
//! Keeps a [`vault_graph::GraphSnapshot`] in sync with a note collection.
//!
//! ## Pipeline
//!
//! ```text
//! ContentSource
//!     │
//!     ├──> list_documents (all-or-nothing)
//!     │
//!     ├──> fetch_document in batches of N
//!     │      └─> failed fetch = empty note
//!     │
//!     ├──> GraphBuilder
//!     │      └─> GraphSnapshot
//!     │
//!     └──> GraphService (atomic swap)
//!            └─> RefreshScheduler (every interval)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vault_indexer::{FsContentSource, GraphService, RefreshConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = Arc::new(FsContentSource::new("/path/to/vault"));
//!     let service = GraphService::new(source, &RefreshConfig::default());
//!     let outcome = service.rebuild().await?;
//!
//!     println!("{} notes", outcome.snapshot.node_count());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod ingest;
mod refresh;
mod service;
mod source;
mod stats;

pub use config::{
    parse_duration, RefreshConfig, DEFAULT_FETCH_BATCH_SIZE, DEFAULT_REBUILD_TIMEOUT,
    DEFAULT_REFRESH_INTERVAL, MAX_DURATION,
};
pub use error::{IndexerError, Result};
pub use ingest::GraphIngestor;
pub use refresh::{RefreshScheduler, MAX_REFRESH_INTERVAL};
pub use service::{GraphService, RebuildOutcome, RefreshHealth};
pub use source::{ContentSource, FsContentSource};
pub use stats::IngestStats;
