use super::super::{CallToolResult, McpError, RebuildGraphResult, VaultGraphService};
use super::error::internal_error;
use super::structured;

pub(in crate::tools::dispatch) async fn rebuild_graph(
    service: &VaultGraphService,
) -> Result<CallToolResult, McpError> {
    let outcome = match service.graph().rebuild().await {
        Ok(outcome) => outcome,
        Err(err) => {
            return Ok(internal_error(format!(
                "Rebuild failed, the previous graph is still being served: {err}"
            )))
        }
    };

    let result = RebuildGraphResult {
        coalesced: outcome.coalesced(),
        notes: outcome.snapshot.node_count(),
        links: outcome.snapshot.edge_count(),
        stats: outcome.stats,
    };

    let text = match &result.stats {
        Some(stats) => format!(
            "Graph rebuilt: {} note(s), {} link(s) from {} document(s), {} fetch failure(s), {} ms",
            result.notes, result.links, stats.documents, stats.fetch_failures, stats.duration_ms
        ),
        None => format!(
            "Joined a rebuild already in progress: {} note(s), {} link(s)",
            result.notes, result.links
        ),
    };
    structured(text, &result)
}
