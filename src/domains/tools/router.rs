//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only wires
//! them together around the shared gateway.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::supabase::SupabaseClient;

use super::definitions::{
    CreateRecordsTool, DeleteRecordsTool, ReadRecordsTool, UpdateRecordsTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(gateway: Arc<SupabaseClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ReadRecordsTool::create_route(gateway.clone()))
        .with_route(CreateRecordsTool::create_route(gateway.clone()))
        .with_route(UpdateRecordsTool::create_route(gateway.clone()))
        .with_route(DeleteRecordsTool::create_route(gateway))
}
