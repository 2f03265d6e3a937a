use crate::parser::{parse_references, parse_tags};
use crate::resolver::{group_from_path, name_from_path};
use crate::types::{DocumentNode, GraphSnapshot};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::time::SystemTime;

struct PendingDocument {
    path: String,
    /// `None` when the body could not be fetched
    content: Option<String>,
}

/// Assemble a [`GraphSnapshot`] from fetched documents.
///
/// Documents are added in collection order. On a name collision the first document keeps
/// the name and every later document with that name is dropped whole: it gets no node,
/// and its references and tags are not read, so its outgoing links are lost.
#[derive(Default)]
pub struct GraphBuilder {
    documents: Vec<PendingDocument>,
}

impl GraphBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&mut self, path: impl Into<String>, content: Option<String>) {
        self.documents.push(PendingDocument {
            path: path.into(),
            content,
        });
    }

    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Build the snapshot, stamping it with `built_at`
    #[must_use]
    pub fn build(self, built_at: SystemTime) -> GraphSnapshot {
        let mut snapshot = GraphSnapshot {
            last_refresh: Some(built_at),
            ..GraphSnapshot::default()
        };

        // Phase 1: every node with empty adjacency, before any edge exists
        let mut owners: Vec<Option<String>> = Vec::with_capacity(self.documents.len());
        for doc in &self.documents {
            let name = name_from_path(&doc.path);
            match snapshot.nodes.entry(name.clone()) {
                Entry::Occupied(existing) => {
                    log::debug!(
                        "Note name '{name}' from {} already taken by {}; skipping",
                        doc.path,
                        existing.get().path
                    );
                    owners.push(None);
                }
                Entry::Vacant(slot) => {
                    let body = doc.content.as_deref().unwrap_or_default();
                    slot.insert(DocumentNode {
                        path: doc.path.clone(),
                        name: name.clone(),
                        group: group_from_path(&doc.path),
                        tags: parse_tags(body),
                        has_content: !body.trim().is_empty(),
                    });
                    snapshot.forward.insert(name.clone(), BTreeSet::new());
                    snapshot.reverse.insert(name.clone(), BTreeSet::new());
                    owners.push(Some(name));
                }
            }
        }

        // Phase 2: edges only towards known names
        let mut dropped = 0usize;
        for (doc, owner) in self.documents.iter().zip(owners) {
            let (Some(source), Some(content)) = (owner, doc.content.as_deref()) else {
                continue;
            };
            for target in parse_references(content) {
                if !snapshot.nodes.contains_key(&target) {
                    dropped += 1;
                    continue;
                }
                link(&mut snapshot.forward, &source, &target);
                link(&mut snapshot.reverse, &target, &source);
            }
        }

        log::info!(
            "Built note graph: {} nodes, {} links ({} dangling references dropped)",
            snapshot.node_count(),
            snapshot.edge_count(),
            dropped
        );

        snapshot
    }
}

fn link(adjacency: &mut BTreeMap<String, BTreeSet<String>>, from: &str, to: &str) {
    if let Some(set) = adjacency.get_mut(from) {
        set.insert(to.to_string());
    }
}
