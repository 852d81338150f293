//! Tool Registry - central registration for all tools.
//!
//! The registry is the single source of truth for the tool surface: the
//! operation names and their metadata. The router built in `router.rs` is
//! checked against it at startup so a tool cannot be registered in one
//! place and forgotten in the other.

use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::Tool;

use super::definitions::{
    CreateRecordsTool, DeleteRecordsTool, ReadRecordsTool, UpdateRecordsTool,
};
use super::error::ToolError;

/// Tool registry - the declared tool surface of the server.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            ReadRecordsTool::NAME,
            CreateRecordsTool::NAME,
            UpdateRecordsTool::NAME,
            DeleteRecordsTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ReadRecordsTool::to_tool(),
            CreateRecordsTool::to_tool(),
            UpdateRecordsTool::to_tool(),
            DeleteRecordsTool::to_tool(),
        ]
    }

    /// Verify at startup that the router exposes exactly the registered
    /// tool set.
    pub fn verify<S>(router: &ToolRouter<S>) -> Result<(), ToolError>
    where
        S: Send + Sync + 'static,
    {
        let routed = router.list_all();
        let routed_names: Vec<&str> = routed.iter().map(|t| t.name.as_ref()).collect();

        for name in Self::tool_names() {
            if !routed_names.contains(&name) {
                return Err(ToolError::registration(format!(
                    "registered tool '{}' has no route",
                    name
                )));
            }
        }

        if routed_names.len() != Self::tool_names().len() {
            return Err(ToolError::registration(format!(
                "router exposes {} tools but {} are registered",
                routed_names.len(),
                Self::tool_names().len()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names.len(), 4);
        assert!(names.contains(&"read_records"));
        assert!(names.contains(&"create_records"));
        assert!(names.contains(&"update_records"));
        assert!(names.contains(&"delete_records"));
    }

    #[test]
    fn test_registry_metadata_matches_names() {
        let tools = ToolRegistry::get_all_tools();
        let names = ToolRegistry::tool_names();
        assert_eq!(tools.len(), names.len());
        for tool in tools {
            assert!(names.contains(&tool.name.as_ref()));
        }
    }

    #[test]
    fn test_verify_rejects_incomplete_router() {
        struct TestServer {}
        let router: ToolRouter<TestServer> =
            ToolRouter::new().with_route(ReadRecordsTool::create_route(
                std::sync::Arc::new(crate::supabase::SupabaseClient::new(
                    &crate::core::config::SupabaseConfig {
                        url: "https://test.supabase.co".to_string(),
                        service_role_key: "test-key".to_string(),
                    },
                ).unwrap()),
            ));
        let err = ToolRegistry::verify(&router).unwrap_err();
        assert!(err.to_string().contains("has no route"));
    }
}
