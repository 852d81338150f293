//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable operations that MCP clients call to query and
//! modify the connected Supabase database.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `router.rs` - ToolRouter builder wiring the routes to the gateway
//! - `registry.rs` - Declared tool surface; checked against the router at
//!   startup
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/records/` (or a new subdomain)
//! 2. Define params, output, and `execute()`
//! 3. Export in `definitions/mod.rs`
//! 4. Add a route in `router.rs` using `with_route()`
//! 5. Register the name in `registry.rs` - startup fails on mismatch

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
