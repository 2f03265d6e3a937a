use super::super::{CallToolResult, GraphStatsResult, McpError, VaultGraphService};
use super::structured;
use std::fmt::Write as _;

pub(in crate::tools::dispatch) fn graph_stats(
    service: &VaultGraphService,
) -> Result<CallToolResult, McpError> {
    let result = GraphStatsResult {
        stats: service.graph().snapshot().stats(),
        refresh: service.graph().health(),
    };
    structured(render(&result), &result)
}

fn render(result: &GraphStatsResult) -> String {
    let stats = &result.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Notes: {}", stats.total_notes);
    let _ = writeln!(out, "Links: {}", stats.total_links);
    let _ = writeln!(out, "Tags: {}", stats.total_tags);
    let _ = writeln!(out, "Groups: {}", stats.group_count);
    let _ = writeln!(out, "Orphans: {}", stats.orphan_count);
    let _ = writeln!(out, "Average links per note: {:.2}", stats.avg_links_per_note);
    match stats.last_refresh_unix_ms {
        Some(ms) => {
            let _ = writeln!(out, "Last refresh (unix ms): {ms}");
        }
        None => out.push_str("Last refresh: never\n"),
    }

    let refresh = &result.refresh;
    if refresh.rebuilding {
        out.push_str("A rebuild is in progress\n");
    }
    if let Some(err) = &refresh.last_error {
        let _ = writeln!(
            out,
            "Last rebuild failed ({} in a row): {err}",
            refresh.consecutive_failures
        );
    }
    out.truncate(out.trim_end().len());
    out
}
