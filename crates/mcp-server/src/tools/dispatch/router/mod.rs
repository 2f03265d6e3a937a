use super::{CallToolResult, Content, McpError};
use serde::Serialize;
use vault_graph::GraphSnapshot;

pub(super) mod clusters;
mod error;
pub(super) mod hubs;
pub(super) mod links;
pub(super) mod orphans;
pub(super) mod path;
pub(super) mod rebuild;
pub(super) mod related;
pub(super) mod stats;

type ToolResult<T> = std::result::Result<T, CallToolResult>;

/// Text rendering first, the record itself as structured content
fn structured<T: Serialize>(text: String, payload: &T) -> Result<CallToolResult, McpError> {
    let value = match serde_json::to_value(payload) {
        Ok(value) => value,
        Err(err) => {
            return Ok(error::internal_error(format!(
                "Failed to serialize tool result: {err}"
            )))
        }
    };
    let mut result = CallToolResult::success(vec![Content::text(text)]);
    result.structured_content = Some(value);
    Ok(result)
}

/// Canonical node name for a user-supplied one, or the trimmed input when nothing matches
fn resolve_or_raw<'a>(graph: &'a GraphSnapshot, query: &'a str) -> &'a str {
    graph.resolve_name(query).unwrap_or_else(|| query.trim())
}

fn require_name(field: &str, value: &str) -> ToolResult<()> {
    if value.trim().is_empty() {
        return Err(error::invalid_request(format!("{field} must not be empty")));
    }
    Ok(())
}
