use rmcp::schemars;
use serde::{Deserialize, Serialize};
use vault_graph::HubEntry;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct HubNotesRequest {
    /// Number of hubs to return
    #[schemars(description = "Number of most-connected notes to return, 1-50 (default: 10)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct HubNotesResult {
    pub limit: usize,
    /// Highest total degree first, ties by name
    pub hubs: Vec<HubEntry>,
}
