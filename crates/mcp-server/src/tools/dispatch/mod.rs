use super::schemas::clusters::{NoteClustersRequest, NoteClustersResult};
use super::schemas::hubs::{HubNotesRequest, HubNotesResult};
use super::schemas::links::NoteLinksRequest;
use super::schemas::orphans::OrphanNotesResult;
use super::schemas::path::{FindPathRequest, FindPathResult};
use super::schemas::rebuild::RebuildGraphResult;
use super::schemas::related::{RelatedNotesRequest, RelatedNotesResult};
use super::schemas::stats::GraphStatsResult;
use super::schemas::{ErrorEnvelope, ToolNextAction};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo, Tool},
    tool, tool_handler, tool_router, ServerHandler,
};
use std::sync::Arc;
use vault_indexer::GraphService;

pub(crate) use rmcp::model::{CallToolResult, Content};
pub(crate) use rmcp::ErrorData as McpError;

mod router;

const INSTRUCTIONS: &str = "Link graph over a Markdown note collection. \
Notes are named by file name without extension; [[wikilinks]] are directed references and \
#tags / frontmatter tags are attributes. Start with graph_stats or hub_notes, then explore \
with related_notes, note_links and find_path. Names are matched case-insensitively. \
The graph refreshes periodically; call rebuild_graph after bulk edits.";

/// MCP front end for a [`GraphService`]
#[derive(Clone)]
pub struct VaultGraphService {
    graph: Arc<GraphService>,
    tool_router: ToolRouter<Self>,
}

impl VaultGraphService {
    pub fn new(graph: Arc<GraphService>) -> Self {
        Self {
            graph,
            tool_router: Self::tool_router(),
        }
    }

    /// Declared tools, in registration order
    pub fn tool_inventory() -> Vec<Tool> {
        Self::tool_router().list_all()
    }

    pub(crate) fn graph(&self) -> &GraphService {
        &self.graph
    }
}

#[tool_router]
impl VaultGraphService {
    #[tool(
        description = "Notes reachable from a note within N reference hops (1-3), following links in both directions. Each note is reported once with its hop distance."
    )]
    pub async fn related_notes(
        &self,
        Parameters(request): Parameters<RelatedNotesRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::related::related_notes(self, request)
    }

    #[tool(
        description = "Shortest chain of references between two notes, ignoring link direction. Distinguishes an unknown note (not_found) from disconnected notes (no_path)."
    )]
    pub async fn find_path(
        &self,
        Parameters(request): Parameters<FindPathRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::path::find_path(self, request)
    }

    #[tool(
        description = "Most connected notes ranked by incoming plus outgoing references (limit 1-50, default 10)."
    )]
    pub async fn hub_notes(
        &self,
        Parameters(request): Parameters<HubNotesRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::hubs::hub_notes(self, request)
    }

    #[tool(description = "Notes that neither link to nor are linked from any other note.")]
    pub async fn orphan_notes(&self) -> Result<CallToolResult, McpError> {
        router::orphans::orphan_notes(self)
    }

    #[tool(
        description = "Notes grouped by containing folder ('group') or by tag ('tag'). Untagged notes form their own cluster."
    )]
    pub async fn note_clusters(
        &self,
        Parameters(request): Parameters<NoteClustersRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::clusters::note_clusters(self, request)
    }

    #[tool(
        description = "Graph totals (notes, links, tags, orphans, groups, average links per note) plus refresh status."
    )]
    pub async fn graph_stats(&self) -> Result<CallToolResult, McpError> {
        router::stats::graph_stats(self)
    }

    #[tool(
        description = "Direct references of one note: notes it links to, notes linking to it, its folder and tags."
    )]
    pub async fn note_links(
        &self,
        Parameters(request): Parameters<NoteLinksRequest>,
    ) -> Result<CallToolResult, McpError> {
        router::links::note_links(self, request)
    }

    #[tool(
        description = "Re-read every note and rebuild the graph now. Joins a rebuild already in progress instead of starting another."
    )]
    pub async fn rebuild_graph(&self) -> Result<CallToolResult, McpError> {
        router::rebuild::rebuild_graph(self).await
    }
}

#[tool_handler]
impl ServerHandler for VaultGraphService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
