use rmcp::schemars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FindPathRequest {
    #[schemars(description = "Note name the path starts at")]
    pub from: String,

    #[schemars(description = "Note name the path ends at")]
    pub to: String,
}

#[derive(Debug, Serialize, schemars::JsonSchema)]
pub struct FindPathResult {
    pub from: String,
    pub to: String,
    /// Number of references crossed (path length minus one)
    pub hops: usize,
    /// Note names from `from` to `to`, endpoints included
    pub path: Vec<String>,
}
