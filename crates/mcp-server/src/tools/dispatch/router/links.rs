use super::super::{CallToolResult, McpError, NoteLinksRequest, VaultGraphService};
use super::error::graph_error;
use super::{require_name, resolve_or_raw, structured};
use vault_graph::{NoteLinks, ROOT_GROUP_LABEL};

pub(in crate::tools::dispatch) fn note_links(
    service: &VaultGraphService,
    request: NoteLinksRequest,
) -> Result<CallToolResult, McpError> {
    if let Err(result) = require_name("name", &request.name) {
        return Ok(result);
    }
    let graph = service.graph().snapshot();
    let name = resolve_or_raw(&graph, &request.name);

    match graph.note_links(name) {
        Ok(links) => structured(render(&links), &links),
        Err(err) => Ok(graph_error(&err, &graph)),
    }
}

fn render(links: &NoteLinks) -> String {
    let group = if links.group.is_empty() {
        ROOT_GROUP_LABEL
    } else {
        links.group.as_str()
    };
    let list = |names: &[String]| {
        if names.is_empty() {
            "-".to_string()
        } else {
            names.join(", ")
        }
    };

    format!(
        "{} ({})\nGroup: {group}\nTags: {}\nLinks to ({}): {}\nLinked from ({}): {}",
        links.name,
        links.path,
        list(&links.tags),
        links.outgoing.len(),
        list(&links.outgoing),
        links.incoming.len(),
        list(&links.incoming)
    )
}
