//! MCP server implementation using rmcp.
//!
//! Serves the Lunch Money tool catalog and prompt templates over stdio or
//! streamable HTTP.

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
};
use tracing::{debug, error, info};

use crate::prompts::{PromptCatalog, PromptError};
use crate::tools::ToolRegistry;

const INSTRUCTIONS: &str = "Lunch Money personal finance server. Tools read and update the \
     user's transactions, categories, tags, budgets, recurring items, assets, Plaid accounts \
     and crypto holdings. Dates use YYYY-MM-DD. Prompts describe common analyses step by step.";

/// MCP server that handles protocol requests and delegates to tool handlers.
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    prompts: Arc<PromptCatalog>,
}

impl McpServer {
    pub fn new(tool_registry: Arc<ToolRegistry>) -> Self {
        Self {
            tool_registry,
            prompts: Arc::new(PromptCatalog::new()),
        }
    }

    /// Get a reference to the tool registry.
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    pub fn prompts(&self) -> &Arc<PromptCatalog> {
        &self.prompts
    }
}

impl ServerHandler for McpServer {
    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let result = ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
            ..Default::default()
        };
        std::future::ready(Ok(result))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        let tool_name = request.name.to_string();
        let args = request.arguments.unwrap_or_default();
        let registry = self.tool_registry.clone();

        async move {
            let Some(handler) = registry.get(&tool_name) else {
                // -32602: unknown tool name
                return Err(McpError::invalid_params(
                    format!("Tool not found: {}", tool_name),
                    None,
                ));
            };

            debug!(tool = %tool_name, "calling tool");
            match handler.execute(args).await {
                Ok(result) => Ok(result),
                Err(e) => {
                    error!(tool = %tool_name, error = %e, "tool execution failed");
                    Err(McpError::internal_error(
                        format!("Tool execution failed: {}", e),
                        None,
                    ))
                }
            }
        }
    }

    fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListPromptsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(self.prompts.list_prompts()))
    }

    fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<GetPromptResult, McpError>> + Send + '_ {
        let today = chrono::Local::now().date_naive();
        let result = self
            .prompts
            .get_prompt(&request.name, request.arguments, today)
            // -32602: unknown prompt or bad arguments
            .map_err(|e: PromptError| McpError::invalid_params(e.to_string(), None));
        std::future::ready(result)
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Start the server as an MCP Streamable HTTP endpoint.
///
/// The MCP endpoint is mounted at `/mcp` on `bind`, e.g. `127.0.0.1:3942`.
/// Every session shares the same tool registry and API client.
pub async fn start_mcp_http(server: McpServer, bind: &str) -> Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = Router::new().nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(bind).await?;

    info!("MCP HTTP server listening on http://{}/mcp", bind);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::config::Config;
    use crate::tools::register_all;

    fn server() -> McpServer {
        let config = Config::new(Some("tok".to_string()))
            .unwrap()
            .with_base_url("http://127.0.0.1:1");
        let registry = register_all(Arc::new(ApiClient::new(Arc::new(config))));
        McpServer::new(Arc::new(registry))
    }

    #[test]
    fn test_info_advertises_tools_and_prompts() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.instructions.unwrap().contains("Lunch Money"));
    }

    #[test]
    fn test_server_shares_catalogs() {
        let server = server();
        assert_eq!(server.tool_registry().len(), 33);
        assert_eq!(server.prompts().names().len(), 4);
    }
}
