use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NoteLinksRequest {
    #[schemars(description = "Note name whose direct references to list")]
    pub name: String,
}
