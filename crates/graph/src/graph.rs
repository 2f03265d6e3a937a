use crate::error::{GraphError, Result};
use crate::types::{
    unix_ms, Cluster, ClusterBy, DocumentNode, GraphSnapshot, GraphStats, HubEntry, NoteLinks,
    OrphanEntry, RelatedNote, ROOT_GROUP_LABEL, UNTAGGED_LABEL,
};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::time::SystemTime;

/// Deepest neighborhood expansion a caller may request
pub const MAX_RELATED_DEPTH: usize = 3;

/// Largest hub ranking a caller may request
pub const MAX_HUBS: usize = 50;

impl GraphSnapshot {
    /// Empty graph that has never been refreshed
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.forward.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn last_refresh(&self) -> Option<SystemTime> {
        self.last_refresh
    }

    #[must_use]
    pub fn get_node(&self, name: &str) -> Option<&DocumentNode> {
        self.nodes.get(name)
    }

    /// All notes, ordered by name
    pub fn nodes(&self) -> impl Iterator<Item = &DocumentNode> {
        self.nodes.values()
    }

    /// Names `name` references. Empty for unknown names.
    pub fn outgoing(&self, name: &str) -> impl Iterator<Item = &str> {
        self.forward
            .get(name)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Names that reference `name`. Empty for unknown names.
    pub fn incoming(&self, name: &str) -> impl Iterator<Item = &str> {
        self.reverse
            .get(name)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    #[must_use]
    pub fn out_degree(&self, name: &str) -> usize {
        self.forward.get(name).map_or(0, BTreeSet::len)
    }

    #[must_use]
    pub fn in_degree(&self, name: &str) -> usize {
        self.reverse.get(name).map_or(0, BTreeSet::len)
    }

    /// Map a user-supplied name onto a node name.
    ///
    /// An exact match wins; otherwise the first (by name) case-insensitive match.
    #[must_use]
    pub fn resolve_name(&self, query: &str) -> Option<&str> {
        let query = query.trim();
        if let Some((name, _)) = self.nodes.get_key_value(query) {
            return Some(name.as_str());
        }
        let lowered = query.to_lowercase();
        self.nodes
            .keys()
            .find(|name| name.to_lowercase() == lowered)
            .map(String::as_str)
    }

    /// Outgoing then incoming neighbors, each in name order, without repeats.
    fn undirected_neighbors<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let outgoing = self.forward.get(name);
        self.outgoing(name).chain(
            self.incoming(name)
                .filter(move |n| outgoing.map_or(true, |out| !out.contains(*n))),
        )
    }

    /// Breadth-first expansion over references in both directions.
    ///
    /// Each note is reported once, at the distance it was first reached, in discovery
    /// order. The start note is never included; an unknown start yields nothing.
    pub fn related(&self, start: &str, max_depth: usize) -> Result<Vec<RelatedNote>> {
        GraphError::check_range("depth", max_depth, 1, MAX_RELATED_DEPTH)?;

        let Some((start, _)) = self.nodes.get_key_value(start) else {
            return Ok(Vec::new());
        };

        let mut visited: HashSet<&str> = HashSet::from([start.as_str()]);
        let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(start.as_str(), 0)]);
        let mut result = Vec::new();

        while let Some((current, depth)) = queue.pop_front() {
            if depth == max_depth {
                continue;
            }
            for neighbor in self.undirected_neighbors(current) {
                if !visited.insert(neighbor) {
                    continue;
                }
                if let Some(node) = self.nodes.get(neighbor) {
                    result.push(RelatedNote {
                        name: node.name.clone(),
                        path: node.path.clone(),
                        distance: depth + 1,
                    });
                }
                queue.push_back((neighbor, depth + 1));
            }
        }

        Ok(result)
    }

    /// Shortest path over references in both directions, endpoints included.
    ///
    /// `from == to` short-circuits to `[from]` without a membership check. Among equally
    /// short paths the one found first wins: outgoing neighbors before incoming ones,
    /// each in name order.
    pub fn find_path(&self, from: &str, to: &str) -> Result<Vec<String>> {
        if from == to {
            return Ok(vec![from.to_string()]);
        }
        let Some((from, _)) = self.nodes.get_key_value(from) else {
            return Err(GraphError::NameNotFound(from.to_string()));
        };
        let Some((to, _)) = self.nodes.get_key_value(to) else {
            return Err(GraphError::NameNotFound(to.to_string()));
        };

        let mut parents: HashMap<&str, &str> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::from([from.as_str()]);
        let mut queue: VecDeque<&str> = VecDeque::from([from.as_str()]);

        while let Some(current) = queue.pop_front() {
            for neighbor in self.undirected_neighbors(current) {
                if !visited.insert(neighbor) {
                    continue;
                }
                parents.insert(neighbor, current);
                if neighbor == to.as_str() {
                    return Ok(reconstruct_path(&parents, from, to));
                }
                queue.push_back(neighbor);
            }
        }

        Err(GraphError::NoPathExists {
            from: from.clone(),
            to: to.clone(),
        })
    }

    /// Notes ranked by total degree, highest first, ties by name.
    pub fn hubs(&self, top_n: usize) -> Result<Vec<HubEntry>> {
        GraphError::check_range("limit", top_n, 1, MAX_HUBS)?;

        let mut entries: Vec<HubEntry> = self
            .nodes
            .values()
            .map(|node| {
                let out_degree = self.out_degree(&node.name);
                let in_degree = self.in_degree(&node.name);
                HubEntry {
                    name: node.name.clone(),
                    path: node.path.clone(),
                    out_degree,
                    in_degree,
                    total: out_degree + in_degree,
                }
            })
            .collect();

        entries.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
        entries.truncate(top_n);
        Ok(entries)
    }

    /// Notes with neither outgoing nor incoming references, by name
    #[must_use]
    pub fn orphans(&self) -> Vec<OrphanEntry> {
        self.nodes
            .values()
            .filter(|node| self.out_degree(&node.name) == 0 && self.in_degree(&node.name) == 0)
            .map(|node| OrphanEntry {
                name: node.name.clone(),
                path: node.path.clone(),
            })
            .collect()
    }

    /// Bucket notes by group or tag, largest bucket first, ties by key.
    ///
    /// Grouping by tag fans out: a note with several tags lands in several buckets.
    #[must_use]
    pub fn clusters(&self, by: ClusterBy) -> Vec<Cluster> {
        let mut buckets: BTreeMap<&str, Vec<String>> = BTreeMap::new();

        for node in self.nodes.values() {
            match by {
                ClusterBy::Group => {
                    let key = if node.group.is_empty() {
                        ROOT_GROUP_LABEL
                    } else {
                        node.group.as_str()
                    };
                    buckets.entry(key).or_default().push(node.name.clone());
                }
                ClusterBy::Tag if node.tags.is_empty() => {
                    buckets
                        .entry(UNTAGGED_LABEL)
                        .or_default()
                        .push(node.name.clone());
                }
                ClusterBy::Tag => {
                    for tag in &node.tags {
                        buckets.entry(tag.as_str()).or_default().push(node.name.clone());
                    }
                }
            }
        }

        let mut clusters: Vec<Cluster> = buckets
            .into_iter()
            .map(|(key, members)| Cluster {
                key: key.to_string(),
                members,
            })
            .collect();
        clusters.sort_by(|a, b| {
            b.members
                .len()
                .cmp(&a.members.len())
                .then_with(|| a.key.cmp(&b.key))
        });
        clusters
    }

    /// Direct neighborhood of one note
    pub fn note_links(&self, name: &str) -> Result<NoteLinks> {
        let node = self
            .nodes
            .get(name)
            .ok_or_else(|| GraphError::NameNotFound(name.to_string()))?;

        Ok(NoteLinks {
            name: node.name.clone(),
            path: node.path.clone(),
            group: node.group.clone(),
            tags: node.tags.iter().cloned().collect(),
            outgoing: self.outgoing(name).map(str::to_string).collect(),
            incoming: self.incoming(name).map(str::to_string).collect(),
        })
    }

    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let total_notes = self.node_count();
        let total_links = self.edge_count();
        let total_tags = self
            .nodes
            .values()
            .flat_map(|node| node.tags.iter())
            .collect::<HashSet<_>>()
            .len();
        let group_count = self
            .nodes
            .values()
            .map(|node| node.group.as_str())
            .collect::<HashSet<_>>()
            .len();

        #[allow(clippy::cast_precision_loss)]
        let avg_links_per_note = if total_notes == 0 {
            0.0
        } else {
            (total_links as f64 / total_notes as f64 * 100.0).round() / 100.0
        };

        GraphStats {
            total_notes,
            total_links,
            total_tags,
            orphan_count: self.orphans().len(),
            avg_links_per_note,
            last_refresh_unix_ms: self.last_refresh.map(unix_ms),
            group_count,
        }
    }
}

fn reconstruct_path(parents: &HashMap<&str, &str>, from: &str, to: &str) -> Vec<String> {
    let mut path = vec![to.to_string()];
    let mut current = to;
    while current != from {
        match parents.get(current) {
            Some(&parent) => {
                path.push(parent.to_string());
                current = parent;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
