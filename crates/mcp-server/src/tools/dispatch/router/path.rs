use super::super::{CallToolResult, FindPathRequest, FindPathResult, McpError, VaultGraphService};
use super::error::graph_error;
use super::{require_name, resolve_or_raw, structured};

pub(in crate::tools::dispatch) fn find_path(
    service: &VaultGraphService,
    request: FindPathRequest,
) -> Result<CallToolResult, McpError> {
    if let Err(result) = require_name("from", &request.from)
        .and_then(|()| require_name("to", &request.to))
    {
        return Ok(result);
    }
    let graph = service.graph().snapshot();
    let from = resolve_or_raw(&graph, &request.from);
    let to = resolve_or_raw(&graph, &request.to);

    let path = match graph.find_path(from, to) {
        Ok(path) => path,
        Err(err) => return Ok(graph_error(&err, &graph)),
    };

    let result = FindPathResult {
        from: from.to_string(),
        to: to.to_string(),
        hops: path.len().saturating_sub(1),
        path,
    };
    let text = format!(
        "Path from '{}' to '{}' ({} hop(s)):\n{}",
        result.from,
        result.to,
        result.hops,
        result.path.join(" -> ")
    );
    structured(text, &result)
}
