//! # Vault Graph
//!
//! In-memory reference graph over a collection of markdown notes.
//!
//! ## Features
//!
//! - **Reference parsing** - `[[Target]]`, `[[Target|Shown]]`, `[[Target#Heading]]`
//! - **Tag parsing** - frontmatter `tags:` lists plus inline `#tags`
//! - **Neighborhood expansion** - notes within N hops, links followed both ways
//! - **Path finding** - shortest reference chain between two notes
//! - **Ranking and grouping** - hubs, orphans, clusters by folder or tag, aggregate stats
//!
//! ## Architecture
//!
//! ```text
//! (path, body)[]
//!     │
//!     ├──> Graph Builder
//!     │      ├─ Resolve name + group from path
//!     │      ├─ Parse tags
//!     │      ├─ Create every node (empty adjacency)
//!     │      └─ Parse references, keep those to known names
//!     │
//!     └──> Graph Snapshot (immutable)
//!            ├─ nodes:   name -> DocumentNode
//!            ├─ forward: name -> {names it references}
//!            └─ reverse: name -> {names referencing it}
//! ```
//!
//! ## Example
//!
//! ```
//! use std::time::SystemTime;
//! use vault_graph::GraphBuilder;
//!
//! let mut builder = GraphBuilder::new();
//! builder.add_document("A.md", Some("[[B]] #idea".to_string()));
//! builder.add_document("B.md", Some(String::new()));
//! let graph = builder.build(SystemTime::now());
//!
//! assert_eq!(graph.find_path("B", "A").unwrap(), vec!["B", "A"]);
//! ```

mod builder;
mod error;
mod graph;
mod parser;
mod resolver;
mod types;

pub use builder::GraphBuilder;
pub use error::{GraphError, Result};
pub use graph::{MAX_HUBS, MAX_RELATED_DEPTH};
pub use parser::{parse_references, parse_tags};
pub use resolver::{group_from_path, name_from_path};
pub use types::{
    unix_ms, Cluster, ClusterBy, DocumentNode, GraphSnapshot, GraphStats, HubEntry, NoteLinks,
    OrphanEntry, RelatedNote, ROOT_GROUP_LABEL, UNTAGGED_LABEL,
};
