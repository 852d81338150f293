//! Supabase MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing CRUD
//! tools for a Supabase database over the stdio transport.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   the main server handler, and the stdio transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: the record tools (read, create, update, delete) executed
//!     by MCP clients
//! - **supabase**: the gateway translating validated tool arguments into
//!   requests against the Supabase REST (PostgREST) API
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use supabase_mcp_server::{core::Config, core::McpServer, supabase::SupabaseClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let gateway = Arc::new(SupabaseClient::new(&config.supabase)?);
//!     let server = McpServer::new(config, gateway)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod supabase;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use supabase::SupabaseClient;
