pub mod clusters;
pub mod hubs;
pub mod links;
pub mod orphans;
pub mod path;
pub mod rebuild;
pub mod related;
pub mod stats;

use rmcp::schemars;
use serde::Serialize;

#[derive(Debug, Serialize, schemars::JsonSchema, Clone)]
pub struct ToolNextAction {
    pub tool: String,
    pub args: serde_json::Value,
    pub reason: String,
}

/// Machine-readable tool failure, carried as `structured_content.error`
#[derive(Debug, Serialize, schemars::JsonSchema, Clone)]
pub struct ErrorEnvelope {
    /// One of `invalid_request`, `not_found`, `no_path`, `internal`
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub next_actions: Vec<ToolNextAction>,
}
