//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It loads configuration,
//! initializes logging, constructs the Supabase gateway, and serves MCP
//! over stdin/stdout until the input stream closes.

use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use supabase_mcp_server::core::{Config, McpServer, StdioTransport};
use supabase_mcp_server::supabase::SupabaseClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment; fails fast when the Supabase
    // credentials are missing.
    let config = Config::from_env()?;

    // Initialize logging (stderr; stdout belongs to the protocol)
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    // The gateway is constructed once and shared by every tool call.
    let gateway = Arc::new(SupabaseClient::new(&config.supabase)?);

    let server = McpServer::new(config, gateway)?;

    info!("Server initialized");

    StdioTransport::run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Configures tracing with the specified log level and format.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
