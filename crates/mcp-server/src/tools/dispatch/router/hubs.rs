use super::super::{CallToolResult, HubNotesRequest, HubNotesResult, McpError, VaultGraphService};
use super::error::graph_error;
use super::structured;
use std::fmt::Write as _;

const DEFAULT_LIMIT: usize = 10;

pub(in crate::tools::dispatch) fn hub_notes(
    service: &VaultGraphService,
    request: HubNotesRequest,
) -> Result<CallToolResult, McpError> {
    let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
    let graph = service.graph().snapshot();
    let hubs = match graph.hubs(limit) {
        Ok(hubs) => hubs,
        Err(err) => return Ok(graph_error(&err, &graph)),
    };

    let result = HubNotesResult { limit, hubs };
    structured(render(&result), &result)
}

fn render(result: &HubNotesResult) -> String {
    if result.hubs.is_empty() {
        return "The graph has no notes.".to_string();
    }
    let mut out = format!("Top {} hub note(s):\n", result.hubs.len());
    for (rank, hub) in result.hubs.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({}) - {} link(s): {} out, {} in",
            rank + 1,
            hub.name,
            hub.path,
            hub.total,
            hub.out_degree,
            hub.in_degree
        );
    }
    out.truncate(out.trim_end().len());
    out
}
