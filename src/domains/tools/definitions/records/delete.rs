//! Delete records tool definition.
//!
//! Removes the rows matching a filter map and reports how many were
//! deleted.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, instrument};

use crate::supabase::{Row, SupabaseClient};

use super::common::{error_result, parse_filter_arg, structured_result, validate_table};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the delete tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteRecordsParams {
    /// Name of the table to delete records from.
    #[schemars(description = "Name of the table to delete records from")]
    pub table: String,

    /// Filtering conditions identifying the records to delete.
    #[schemars(
        description = "Filtering conditions to identify records to delete (e.g. {\"id\": 123})"
    )]
    pub filters: Map<String, Value>,
}

// ============================================================================
// Structured Output
// ============================================================================

/// Result of a delete operation.
#[derive(Debug, Serialize, JsonSchema)]
pub struct DeleteRecordsResult {
    /// Table the records were deleted from.
    pub table: String,
    /// Number of records deleted.
    pub deleted_count: usize,
    /// The deleted records as they were before deletion.
    pub records: Vec<Row>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Delete tool - removes records matching filter conditions.
pub struct DeleteRecordsTool;

impl DeleteRecordsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "delete_records";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete records from a Supabase database table based on filter conditions. \
         IMPORTANT: deletions are permanent and cannot be undone; always confirm the filter \
         conditions carefully and use specific conditions to avoid removing too many records. \
         Returns the number of deleted records along with the records as they were before \
         deletion.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(table = %params.table))]
    pub fn execute(params: &DeleteRecordsParams, gateway: &SupabaseClient) -> CallToolResult {
        info!("Delete records tool called for table '{}'", params.table);

        let table = match validate_table(&params.table) {
            Ok(t) => t,
            Err(result) => return *result,
        };

        let clauses = match parse_filter_arg(Some(&params.filters)) {
            Ok(c) => c,
            Err(result) => return *result,
        };
        // An unfiltered delete would empty the whole table.
        if clauses.is_empty() {
            return error_result("'filters' must contain at least one condition");
        }

        match gateway.delete_records(table, &clauses) {
            Ok(records) => {
                let deleted_count = records.len();
                let summary = format!("Deleted {} record(s) from '{}'", deleted_count, table);
                structured_result(
                    summary,
                    DeleteRecordsResult {
                        table: table.to_string(),
                        deleted_count,
                        records,
                    },
                )
            }
            Err(e) => {
                error!("Delete records failed: {:?}", e);
                error_result(&format!("Failed to delete records from '{}': {}", table, e))
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<DeleteRecordsParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<DeleteRecordsResult>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the stdio transport.
    pub fn create_route<S>(gateway: Arc<SupabaseClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let gateway = gateway.clone();
            async move {
                let params: DeleteRecordsParams =
                    serde_json::from_value(Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                let result =
                    tokio::task::spawn_blocking(move || Self::execute(&params, &gateway))
                        .await
                        .map_err(|_| {
                            McpError::internal_error("Task panicked".to_string(), None)
                        })?;

                Ok(result)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SupabaseConfig;
    use crate::domains::tools::definitions::records::common::result_text;
    use serde_json::json;

    fn test_gateway() -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: "https://test.supabase.co".to_string(),
            service_role_key: "test-key".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_params_require_filters() {
        assert!(serde_json::from_value::<DeleteRecordsParams>(json!({
            "table": "users"
        }))
        .is_err());
    }

    #[test]
    fn test_execute_rejects_empty_filters() {
        let params: DeleteRecordsParams = serde_json::from_value(json!({
            "table": "users",
            "filters": {}
        }))
        .unwrap();
        let result = DeleteRecordsTool::execute(&params, &test_gateway());
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("filters"));
    }

    #[test]
    fn test_execute_rejects_empty_table() {
        let params: DeleteRecordsParams = serde_json::from_value(json!({
            "table": " ",
            "filters": {"id": 1}
        }))
        .unwrap();
        let result = DeleteRecordsTool::execute(&params, &test_gateway());
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("table"));
    }

    #[test]
    fn test_execute_rejects_bad_filter_before_any_call() {
        let params: DeleteRecordsParams = serde_json::from_value(json!({
            "table": "users",
            "filters": {"tags": [1, 2]}
        }))
        .unwrap();
        let result = DeleteRecordsTool::execute(&params, &test_gateway());
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("'in' operator"));
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = DeleteRecordsTool::to_tool();
        assert_eq!(tool.name.as_ref(), "delete_records");
        assert!(tool.description.as_ref().unwrap().contains("permanent"));
    }
}
