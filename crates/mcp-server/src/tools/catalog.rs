use super::VaultGraphService;
use serde_json::{json, Value};

/// Tool names and descriptions as printed by `--print-tools`
pub fn tool_inventory_json(version: &str) -> Value {
    let tools: Vec<Value> = VaultGraphService::tool_inventory()
        .into_iter()
        .map(|tool| {
            json!({
                "name": tool.name,
                "description": tool.description,
            })
        })
        .collect();

    json!({
        "server": "vault-graph-mcp",
        "version": version,
        "tools": tools,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_lists_every_graph_tool() {
        let inventory = tool_inventory_json("0.0.0");
        let mut names: Vec<&str> = inventory["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|tool| tool["name"].as_str())
            .collect();
        names.sort_unstable();

        assert_eq!(
            names,
            vec![
                "find_path",
                "graph_stats",
                "hub_notes",
                "note_clusters",
                "note_links",
                "orphan_notes",
                "rebuild_graph",
                "related_notes",
            ]
        );
        assert_eq!(inventory["version"], "0.0.0");
    }
}
