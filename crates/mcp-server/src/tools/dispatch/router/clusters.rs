use super::super::{
    CallToolResult, McpError, NoteClustersRequest, NoteClustersResult, VaultGraphService,
};
use super::error::invalid_request;
use super::structured;
use std::fmt::Write as _;
use vault_graph::ClusterBy;

pub(in crate::tools::dispatch) fn note_clusters(
    service: &VaultGraphService,
    request: NoteClustersRequest,
) -> Result<CallToolResult, McpError> {
    let by = match request.by.as_deref().map(str::parse::<ClusterBy>) {
        None => ClusterBy::default(),
        Some(Ok(by)) => by,
        Some(Err(message)) => return Ok(invalid_request(message)),
    };

    let clusters = service.graph().snapshot().clusters(by);
    let result = NoteClustersResult {
        by,
        count: clusters.len(),
        clusters,
    };
    structured(render(&result), &result)
}

fn render(result: &NoteClustersResult) -> String {
    if result.clusters.is_empty() {
        return "The graph has no notes.".to_string();
    }
    let mut out = format!("{} cluster(s) by {}:\n", result.count, result.by);
    for cluster in &result.clusters {
        let _ = writeln!(
            out,
            "## {} ({})\n  {}",
            cluster.key,
            cluster.members.len(),
            cluster.members.join(", ")
        );
    }
    out.truncate(out.trim_end().len());
    out
}
