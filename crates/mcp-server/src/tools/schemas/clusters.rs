use rmcp::schemars;
use serde::{Deserialize, Serialize};
use vault_graph::{Cluster, ClusterBy};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NoteClustersRequest {
    /// Attribute to bucket by
    #[schemars(description = "Bucket by 'group' (containing folder) or 'tag' (default: group)")]
    pub by: Option<String>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct NoteClustersResult {
    pub by: ClusterBy,
    pub count: usize,
    /// Largest cluster first, ties by key
    pub clusters: Vec<Cluster>,
}
