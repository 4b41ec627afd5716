// Core modules
pub mod api;
pub mod config;

pub mod prompts;
pub mod server;
pub mod tools;

// Re-export key types and functions
pub use api::{ApiClient, ApiError, ApiRequest};
pub use config::{Config, ConfigError};
pub use prompts::{PromptCatalog, PromptError};
pub use server::McpServer;
pub use tools::{ToolHandler, ToolRegistry};

use std::sync::Arc;

/// Convenience function to create a fully configured MCP server.
///
/// Builds the shared API client from `config`, registers every Lunch Money
/// tool, and returns a `McpServer` that implements rmcp's `ServerHandler`.
pub fn create_server(config: Config) -> McpServer {
    let client = Arc::new(ApiClient::new(Arc::new(config)));
    let tool_registry = Arc::new(tools::register_all(client));
    McpServer::new(tool_registry)
}
