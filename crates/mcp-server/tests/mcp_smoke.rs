use anyhow::{Context, Result};
use rmcp::{
    model::{CallToolRequestParam, CallToolResult},
    service::{RunningService, ServiceExt},
    transport::TokioChildProcess,
    RoleClient,
};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

type Client = RunningService<RoleClient, ()>;

fn locate_vault_graph_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_vault-graph-mcp") {
        return Ok(PathBuf::from(path));
    }

    // `.../target/{debug|release}/deps/<test>` -> `.../target/{debug|release}/vault-graph-mcp`
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join("vault-graph-mcp");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    anyhow::bail!("failed to locate vault-graph-mcp binary")
}

fn write_vault(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root.join("inbox")).context("mkdir inbox")?;
    std::fs::write(root.join("A.md"), "Links to [[B]] and [[C]]. #x\n").context("write A")?;
    std::fs::write(root.join("B.md"), "Back to [[A]]\n").context("write B")?;
    std::fs::write(root.join("C.md"), "").context("write C")?;
    std::fs::write(root.join("inbox/Lonely.md"), "---\ntags: [idea]\n---\nNo links here\n")
        .context("write Lonely")?;
    Ok(())
}

async fn start_server(root: &Path) -> Result<Client> {
    let mut cmd = Command::new(locate_vault_graph_mcp_bin()?);
    cmd.env("VAULT_GRAPH_ROOT", root);
    cmd.env("VAULT_GRAPH_REFRESH_INTERVAL", "1h");
    cmd.env("RUST_LOG", "warn");

    let transport = TokioChildProcess::new(cmd).context("spawn mcp server")?;
    tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")?
        .context("MCP handshake")
}

async fn call(service: &Client, name: &'static str, args: Value) -> Result<CallToolResult> {
    tokio::time::timeout(
        Duration::from_secs(10),
        service.call_tool(CallToolRequestParam {
            name: name.into(),
            arguments: args.as_object().cloned(),
        }),
    )
    .await
    .with_context(|| format!("timeout calling {name}"))?
    .with_context(|| format!("call {name}"))
}

fn structured(result: &CallToolResult) -> Result<&Value> {
    result
        .structured_content
        .as_ref()
        .context("tool returned no structured content")
}

fn text(result: &CallToolResult) -> Result<&str> {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.as_str())
        .context("tool did not return text content")
}

fn error_code(result: &CallToolResult) -> Option<&str> {
    result
        .structured_content
        .as_ref()
        .and_then(|v| v.pointer("/error/code"))
        .and_then(Value::as_str)
}

#[tokio::test]
async fn mcp_exposes_graph_tools() -> Result<()> {
    let tmp = tempfile::tempdir().context("tempdir")?;
    write_vault(tmp.path())?;
    let service = start_server(tmp.path()).await?;

    let tools = tokio::time::timeout(
        Duration::from_secs(10),
        service.list_tools(Default::default()),
    )
    .await
    .context("timeout listing tools")??;
    let tool_names: HashSet<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();
    for expected in [
        "related_notes",
        "find_path",
        "hub_notes",
        "orphan_notes",
        "note_clusters",
        "graph_stats",
        "note_links",
        "rebuild_graph",
    ] {
        assert!(
            tool_names.contains(expected),
            "missing tool '{expected}' (available: {tool_names:?})"
        );
    }

    let stats = call(&service, "graph_stats", json!({})).await?;
    assert_ne!(stats.is_error, Some(true), "graph_stats returned error");
    let stats_json = structured(&stats)?;
    assert_eq!(stats_json["total_notes"], 4);
    assert_eq!(stats_json["total_links"], 3);
    assert_eq!(stats_json["orphan_count"], 1);
    assert_eq!(stats_json["group_count"], 2);
    assert_eq!(stats_json["avg_links_per_note"], 0.75);
    assert!(text(&stats)?.contains("Notes: 4"));

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}

#[tokio::test]
async fn mcp_graph_queries_answer_over_stdio() -> Result<()> {
    let tmp = tempfile::tempdir().context("tempdir")?;
    write_vault(tmp.path())?;
    let service = start_server(tmp.path()).await?;

    let path = call(&service, "find_path", json!({ "from": "b", "to": "C" })).await?;
    assert_ne!(path.is_error, Some(true), "find_path returned error");
    assert_eq!(structured(&path)?["path"], json!(["B", "A", "C"]));
    assert_eq!(structured(&path)?["hops"], 2);
    assert!(text(&path)?.contains("B -> A -> C"));

    let related = call(&service, "related_notes", json!({ "name": "C", "depth": 2 })).await?;
    assert_ne!(related.is_error, Some(true), "related_notes returned error");
    assert_eq!(
        structured(&related)?["related"],
        json!([
            { "name": "A", "path": "A.md", "distance": 1 },
            { "name": "B", "path": "B.md", "distance": 2 },
        ])
    );

    let hubs = call(&service, "hub_notes", json!({ "limit": 1 })).await?;
    let top = &structured(&hubs)?["hubs"][0];
    assert_eq!(top["name"], "A");
    assert_eq!(top["total"], 3);

    let orphans = call(&service, "orphan_notes", json!({})).await?;
    assert_eq!(
        structured(&orphans)?["orphans"],
        json!([{ "name": "Lonely", "path": "inbox/Lonely.md" }])
    );

    let clusters = call(&service, "note_clusters", json!({ "by": "tag" })).await?;
    let keys: Vec<&str> = structured(&clusters)?["clusters"]
        .as_array()
        .context("clusters array")?
        .iter()
        .filter_map(|c| c["key"].as_str())
        .collect();
    assert_eq!(keys, vec!["(untagged)", "idea", "x"]);

    let links = call(&service, "note_links", json!({ "name": "a" })).await?;
    assert_eq!(structured(&links)?["outgoing"], json!(["B", "C"]));
    assert_eq!(structured(&links)?["incoming"], json!(["B"]));
    assert_eq!(structured(&links)?["tags"], json!(["x"]));

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}

#[tokio::test]
async fn mcp_reports_structured_errors() -> Result<()> {
    let tmp = tempfile::tempdir().context("tempdir")?;
    write_vault(tmp.path())?;
    let service = start_server(tmp.path()).await?;

    let missing = call(&service, "find_path", json!({ "from": "A", "to": "Ghost" })).await?;
    assert_eq!(missing.is_error, Some(true));
    assert_eq!(error_code(&missing), Some("not_found"));

    let disconnected =
        call(&service, "find_path", json!({ "from": "A", "to": "Lonely" })).await?;
    assert_eq!(disconnected.is_error, Some(true));
    assert_eq!(error_code(&disconnected), Some("no_path"));

    let too_many = call(&service, "hub_notes", json!({ "limit": 0 })).await?;
    assert_eq!(too_many.is_error, Some(true));
    assert_eq!(error_code(&too_many), Some("invalid_request"));

    let too_deep = call(&service, "related_notes", json!({ "name": "A", "depth": 4 })).await?;
    assert_eq!(error_code(&too_deep), Some("invalid_request"));

    let bad_attr = call(&service, "note_clusters", json!({ "by": "color" })).await?;
    assert_eq!(error_code(&bad_attr), Some("invalid_request"));

    let unknown = call(&service, "note_links", json!({ "name": "Nobody" })).await?;
    assert_eq!(error_code(&unknown), Some("not_found"));

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}

#[tokio::test]
async fn mcp_rebuild_picks_up_new_notes() -> Result<()> {
    let tmp = tempfile::tempdir().context("tempdir")?;
    write_vault(tmp.path())?;
    let service = start_server(tmp.path()).await?;

    std::fs::write(tmp.path().join("D.md"), "See [[C]]\n").context("write D")?;
    let rebuild = call(&service, "rebuild_graph", json!({})).await?;
    assert_ne!(rebuild.is_error, Some(true), "rebuild_graph returned error");
    let rebuild_json = structured(&rebuild)?;
    assert_eq!(rebuild_json["coalesced"], false);
    assert_eq!(rebuild_json["notes"], 5);
    assert_eq!(rebuild_json["links"], 4);

    let links = call(&service, "note_links", json!({ "name": "C" })).await?;
    assert_eq!(structured(&links)?["incoming"], json!(["A", "D"]));

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}
