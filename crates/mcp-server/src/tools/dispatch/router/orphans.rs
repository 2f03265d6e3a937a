use super::super::{CallToolResult, McpError, OrphanNotesResult, VaultGraphService};
use super::structured;

pub(in crate::tools::dispatch) fn orphan_notes(
    service: &VaultGraphService,
) -> Result<CallToolResult, McpError> {
    let orphans = service.graph().snapshot().orphans();
    let result = OrphanNotesResult {
        count: orphans.len(),
        orphans,
    };

    let text = if result.orphans.is_empty() {
        "No orphan notes.".to_string()
    } else {
        let lines: Vec<String> = result
            .orphans
            .iter()
            .map(|o| format!("- {} ({})", o.name, o.path))
            .collect();
        format!("{} orphan note(s):\n{}", result.count, lines.join("\n"))
    };
    structured(text, &result)
}
