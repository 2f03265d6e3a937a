use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Bucket label for notes that live at the collection root.
pub const ROOT_GROUP_LABEL: &str = "(root)";

/// Bucket label for notes without any tag.
pub const UNTAGGED_LABEL: &str = "(untagged)";

/// One note in the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentNode {
    /// Full path inside the collection (`group/name.md`)
    pub path: String,
    /// Short name, the key used by every graph query
    pub name: String,
    /// Parent path segments, empty at the root
    pub group: String,
    pub tags: BTreeSet<String>,
    /// Whether the fetched body was non-blank
    pub has_content: bool,
}

/// Immutable graph of notes and their `[[references]]`.
///
/// Every node owns a forward and a reverse adjacency entry (possibly empty), and every
/// adjacency member is itself a node. Maps are ordered, so enumeration is by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSnapshot {
    pub(crate) nodes: BTreeMap<String, DocumentNode>,
    pub(crate) forward: BTreeMap<String, BTreeSet<String>>,
    pub(crate) reverse: BTreeMap<String, BTreeSet<String>>,
    pub(crate) last_refresh: Option<SystemTime>,
}

/// Which attribute `clusters` buckets notes by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClusterBy {
    #[default]
    Group,
    Tag,
}

impl FromStr for ClusterBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "group" | "folder" => Ok(Self::Group),
            "tag" | "tags" => Ok(Self::Tag),
            other => Err(format!("unknown cluster attribute '{other}' (expected group or tag)")),
        }
    }
}

impl fmt::Display for ClusterBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => f.write_str("group"),
            Self::Tag => f.write_str("tag"),
        }
    }
}

/// A note reached by neighborhood expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct RelatedNote {
    pub name: String,
    pub path: String,
    /// Hops from the start note in the undirected view
    pub distance: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct HubEntry {
    pub name: String,
    pub path: String,
    pub out_degree: usize,
    pub in_degree: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct OrphanEntry {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Cluster {
    pub key: String,
    /// Member names, sorted
    pub members: Vec<String>,
}

/// Direct references of a single note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct NoteLinks {
    pub name: String,
    pub path: String,
    pub group: String,
    pub tags: Vec<String>,
    pub outgoing: Vec<String>,
    pub incoming: Vec<String>,
}

/// Aggregate figures for the whole snapshot
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct GraphStats {
    pub total_notes: usize,
    /// Sum of out-degrees
    pub total_links: usize,
    /// Distinct tags across all notes
    pub total_tags: usize,
    pub orphan_count: usize,
    /// Rounded to two decimals, 0 for an empty graph
    pub avg_links_per_note: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refresh_unix_ms: Option<u64>,
    pub group_count: usize,
}

/// Milliseconds since the Unix epoch, 0 for earlier times
pub fn unix_ms(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
