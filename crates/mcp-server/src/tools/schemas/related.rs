use rmcp::schemars;
use serde::{Deserialize, Serialize};
use vault_graph::RelatedNote;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RelatedNotesRequest {
    /// Note to start from
    #[schemars(description = "Note name to start from (file name without the .md extension)")]
    pub name: String,

    /// Maximum number of hops
    #[schemars(description = "Reference hops to follow in either direction, 1-3 (default: 1)")]
    pub depth: Option<usize>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct RelatedNotesResult {
    /// Resolved start note
    pub name: String,
    pub depth: usize,
    /// Reachable notes in discovery order
    pub related: Vec<RelatedNote>,
}
