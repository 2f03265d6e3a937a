use super::super::{
    CallToolResult, McpError, RelatedNotesRequest, RelatedNotesResult, VaultGraphService,
};
use super::error::graph_error;
use super::{require_name, resolve_or_raw, structured};
use std::fmt::Write as _;

const DEFAULT_DEPTH: usize = 1;

pub(in crate::tools::dispatch) fn related_notes(
    service: &VaultGraphService,
    request: RelatedNotesRequest,
) -> Result<CallToolResult, McpError> {
    if let Err(result) = require_name("name", &request.name) {
        return Ok(result);
    }
    let depth = request.depth.unwrap_or(DEFAULT_DEPTH);
    let graph = service.graph().snapshot();
    let name = resolve_or_raw(&graph, &request.name);

    let related = match graph.related(name, depth) {
        Ok(related) => related,
        Err(err) => return Ok(graph_error(&err, &graph)),
    };
    let known = graph.get_node(name).is_some();

    let result = RelatedNotesResult {
        name: name.to_string(),
        depth,
        related,
    };
    structured(render(&result, known), &result)
}

fn render(result: &RelatedNotesResult, known: bool) -> String {
    if !known {
        return format!("No note named '{}' in the graph.", result.name);
    }
    if result.related.is_empty() {
        return format!(
            "'{}' has no linked notes within {} hop(s).",
            result.name, result.depth
        );
    }

    let mut out = format!(
        "{} note(s) within {} hop(s) of '{}':\n",
        result.related.len(),
        result.depth,
        result.name
    );
    for note in &result.related {
        let _ = writeln!(out, "  [{}] {} ({})", note.distance, note.name, note.path);
    }
    out.truncate(out.trim_end().len());
    out
}
