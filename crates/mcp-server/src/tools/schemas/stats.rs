use rmcp::schemars;
use serde::Serialize;
use vault_graph::GraphStats;
use vault_indexer::RefreshHealth;

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct GraphStatsResult {
    #[serde(flatten)]
    pub stats: GraphStats,
    /// State of the background rebuild loop
    pub refresh: RefreshHealth,
}
