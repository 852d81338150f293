//! Stdio transport for the MCP server.
//!
//! The server speaks MCP over standard input/output, the transport fixed by
//! its deployment model (one server process per assistant client). The
//! process runs until its input stream closes.

use rmcp::ServiceExt;
use thiserror::Error;
use tracing::info;

use super::server::McpServer;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur in transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Server initialization error.
    #[error("Server initialization error: {0}")]
    Init(String),

    /// Service error from rmcp.
    #[error("Service error: {0}")]
    Service(String),
}

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the server over stdin/stdout until the input stream closes.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::Init(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::Service(e.to_string()))?;

        info!("STDIO transport finished");
        Ok(())
    }
}
