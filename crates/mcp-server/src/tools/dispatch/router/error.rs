use super::super::{CallToolResult, Content, ErrorEnvelope, ToolNextAction};
use serde_json::json;
use vault_graph::{GraphError, GraphSnapshot};

const MAX_SUGGESTIONS: usize = 5;

fn tool_error_envelope(error: ErrorEnvelope) -> CallToolResult {
    let mut result = CallToolResult::error(vec![Content::text(error.message.clone())]);
    result.structured_content = Some(json!({ "error": error }));
    result
}

fn tool_error(code: &'static str, message: impl Into<String>) -> CallToolResult {
    tool_error_envelope(ErrorEnvelope {
        code: code.to_string(),
        message: message.into(),
        hint: None,
        next_actions: Vec::new(),
    })
}

pub(super) fn invalid_request(message: impl Into<String>) -> CallToolResult {
    tool_error("invalid_request", message)
}

pub(super) fn internal_error(message: impl Into<String>) -> CallToolResult {
    tool_error("internal", message)
}

/// Map a query failure onto the tool error vocabulary
pub(super) fn graph_error(err: &GraphError, graph: &GraphSnapshot) -> CallToolResult {
    match err {
        GraphError::NameNotFound(name) => not_found(err.to_string(), name, graph),
        GraphError::NoPathExists { from, to } => tool_error_envelope(ErrorEnvelope {
            code: "no_path".to_string(),
            message: err.to_string(),
            hint: Some(format!(
                "'{from}' and '{to}' sit in disconnected parts of the graph"
            )),
            next_actions: vec![ToolNextAction {
                tool: "related_notes".to_string(),
                args: json!({ "name": from, "depth": 3 }),
                reason: format!("See what '{from}' is connected to."),
            }],
        }),
        GraphError::InvalidParameter { .. } => invalid_request(err.to_string()),
    }
}

fn not_found(message: String, name: &str, graph: &GraphSnapshot) -> CallToolResult {
    if graph.is_empty() {
        return tool_error_envelope(ErrorEnvelope {
            code: "not_found".to_string(),
            message,
            hint: Some("The graph is empty; no notes have been loaded yet".to_string()),
            next_actions: vec![ToolNextAction {
                tool: "rebuild_graph".to_string(),
                args: json!({}),
                reason: "Load the note collection now.".to_string(),
            }],
        });
    }

    let suggestions = similar_names(graph, name);
    let hint = (!suggestions.is_empty())
        .then(|| format!("Similar note names: {}", suggestions.join(", ")));
    let next_actions = suggestions
        .first()
        .map(|candidate| ToolNextAction {
            tool: "note_links".to_string(),
            args: json!({ "name": candidate }),
            reason: format!("Inspect '{candidate}', the closest match."),
        })
        .into_iter()
        .collect();

    tool_error_envelope(ErrorEnvelope {
        code: "not_found".to_string(),
        message,
        hint,
        next_actions,
    })
}

/// Names containing the query, case-insensitively, in name order
fn similar_names(graph: &GraphSnapshot, query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    graph
        .nodes()
        .filter(|node| node.name.to_lowercase().contains(&needle))
        .map(|node| node.name.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}
