use rmcp::schemars;
use serde::Serialize;
use vault_graph::OrphanEntry;

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct OrphanNotesResult {
    pub count: usize,
    pub orphans: Vec<OrphanEntry>,
}
