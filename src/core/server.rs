//! MCP Server implementation and lifecycle management.
//!
//! The server handler implements the MCP protocol by delegating tool calls
//! to the routes built in `domains/tools/router.rs`. Each tool is defined
//! in its own file under `domains/tools/definitions/`; the registry in
//! `domains/tools/registry.rs` is the source of truth for the tool set and
//! the router is checked against it when the server is constructed.

use std::sync::Arc;

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use super::config::Config;
use crate::domains::tools::{ToolRegistry, build_tool_router};
use crate::supabase::SupabaseClient;

/// The main MCP server handler.
///
/// Holds the configuration and the tool router; the Supabase gateway is
/// owned by the tool routes, constructed once at startup and shared.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration and gateway.
    ///
    /// Fails if the tool router does not expose exactly the registered
    /// tool set.
    pub fn new(config: Config, gateway: Arc<SupabaseClient>) -> super::error::Result<Self> {
        let tool_router = build_tool_router::<Self>(gateway);
        ToolRegistry::verify(&tool_router)?;

        Ok(Self {
            config: Arc::new(config),
            tool_router,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "This server provides CRUD tools for a Supabase database: \
                 read_records, create_records, update_records, and delete_records. \
                 All operations target tables in the connected project."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{LoggingConfig, ServerConfig, SupabaseConfig};

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                name: "supabase-mcp".to_string(),
                version: "0.0.0".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            supabase: SupabaseConfig {
                url: "https://test.supabase.co".to_string(),
                service_role_key: "test-key".to_string(),
            },
        }
    }

    #[test]
    fn test_server_construction_passes_registry_check() {
        let config = test_config();
        let gateway = Arc::new(SupabaseClient::new(&config.supabase).unwrap());
        let server = McpServer::new(config, gateway).unwrap();
        assert_eq!(server.name(), "supabase-mcp");
        assert_eq!(server.version(), "0.0.0");
    }

    #[test]
    fn test_get_info_advertises_tools() {
        let config = test_config();
        let gateway = Arc::new(SupabaseClient::new(&config.supabase).unwrap());
        let server = McpServer::new(config, gateway).unwrap();
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("read_records"));
    }
}
