use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Figures from one graph rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IngestStats {
    /// Documents returned by the listing
    pub documents: usize,
    /// Documents whose body was non-blank
    pub with_content: usize,
    /// Documents whose fetch failed and were kept as empty notes
    pub fetch_failures: usize,
    /// Nodes in the resulting graph (name collisions collapse documents)
    pub notes: usize,
    pub links: usize,
    pub duration_ms: u64,
}

impl IngestStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
