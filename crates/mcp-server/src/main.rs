//! Vault Graph MCP Server
//!
//! Answers link-graph questions about a directory of Markdown notes over the MCP protocol.
//!
//! ## Tools
//!
//! - `related_notes` - Notes within N reference hops of a note
//! - `find_path` - Shortest reference chain between two notes
//! - `hub_notes` - Most connected notes
//! - `orphan_notes` - Notes with no references in or out
//! - `note_clusters` - Notes grouped by folder or tag
//! - `graph_stats` - Totals plus refresh status
//! - `note_links` - Direct references of one note
//! - `rebuild_graph` - Re-read the collection now
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "vault-graph": {
//!       "command": "vault-graph-mcp",
//!       "env": { "VAULT_GRAPH_ROOT": "/path/to/notes" }
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use rmcp::ServiceExt;
use std::env;
use std::sync::Arc;
use vault_indexer::{FsContentSource, GraphService, RefreshScheduler};

mod runtime_env;
mod tools;

use tools::catalog;
use tools::VaultGraphService;

fn print_help() {
    println!("Vault Graph MCP server");
    println!();
    println!("Usage: vault-graph-mcp [--print-tools|--version|--help]");
    println!();
    println!("Flags:");
    println!("  --print-tools  Print tool inventory as JSON and exit");
    println!("  --version      Print version and exit");
    println!("  --help         Print this help and exit");
    println!();
    println!("Environment:");
    println!(
        "  {:<30} Note collection directory (default: current directory)",
        runtime_env::ROOT_ENV
    );
    println!(
        "  {:<30} Refresh period, e.g. 90s, 5m (default: 5m)",
        runtime_env::REFRESH_INTERVAL_ENV
    );
    println!(
        "  {:<30} Abort a rebuild after this long (default: 2m)",
        runtime_env::REBUILD_TIMEOUT_ENV
    );
    println!(
        "  {:<30} Documents fetched concurrently (default: 20)",
        runtime_env::FETCH_BATCH_ENV
    );
}

fn handle_cli_args() -> Option<i32> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        return None;
    }

    if args.len() == 1 {
        match args[0].as_str() {
            "--print-tools" => {
                let payload = catalog::tool_inventory_json(env!("CARGO_PKG_VERSION"));
                println!("{payload}");
                return Some(0);
            }
            "--version" | "-V" => {
                println!("vault-graph-mcp {}", env!("CARGO_PKG_VERSION"));
                return Some(0);
            }
            "--help" | "-h" => {
                print_help();
                return Some(0);
            }
            _ => {}
        }
    }

    eprintln!("Unknown arguments: {}", args.join(" "));
    print_help();
    Some(2)
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Some(exit_code) = handle_cli_args() {
        std::process::exit(exit_code);
    }

    // stdout carries the MCP protocol
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let bootstrap = runtime_env::bootstrap_from_env();
    for warning in &bootstrap.warnings {
        log::warn!("{warning}");
    }

    log::info!(
        "Starting Vault Graph MCP server for {}",
        bootstrap.root.display()
    );

    let source = Arc::new(FsContentSource::new(&bootstrap.root));
    let graph = Arc::new(GraphService::new(source, &bootstrap.refresh));
    if let Err(err) = graph.rebuild().await {
        log::warn!("Initial graph build failed, serving an empty graph until refresh: {err}");
    }
    let scheduler = RefreshScheduler::start(Arc::clone(&graph), bootstrap.refresh.interval);

    let service = VaultGraphService::new(graph);
    let server = service.serve(rmcp::transport::stdio()).await?;

    server.waiting().await?;

    scheduler.shutdown().await;
    log::info!("Vault Graph MCP server stopped");
    Ok(())
}
