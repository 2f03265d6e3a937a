use rmcp::schemars;
use serde::Serialize;
use vault_indexer::IngestStats;

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct RebuildGraphResult {
    /// True when the call joined a rebuild that was already running
    pub coalesced: bool,
    pub notes: usize,
    pub links: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<IngestStats>,
}
