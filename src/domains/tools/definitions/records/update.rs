//! Update records tool definition.
//!
//! Modifies the rows matching a filter map; rows not matching are left
//! unchanged.

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

/// Parameters for the update tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateRecordsParams {
    /// Name of the table to update records in.
    #[schemars(description = "Name of the table to update records in")]
    pub table: String,

    /// Fields to update as key-value pairs.
    #[schemars(description = "Fields to update as key-value pairs")]
    pub updates: Map<String, Value>,

    /// Filtering conditions identifying the records to update.
    #[schemars(
        description = "Filtering conditions to identify records to update (e.g. {\"id\": 123})"
    )]
    pub filters: Map<String, Value>,
}

// ============================================================================
// Structured Output
// ============================================================================

/// Result of an update operation.
#[derive(Debug, Serialize, JsonSchema)]
pub struct UpdateRecordsResult {
    /// Table the records were updated in.
    pub table: String,
    /// Updated records after modification.
    pub records: Vec<Row>,
    /// Number of records updated.
    pub count: usize,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Update tool - modifies records matching filter conditions.
pub struct UpdateRecordsTool;

impl UpdateRecordsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update_records";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update existing records in a Supabase database table based on filter conditions. \
         The 'updates' parameter specifies which fields to change and their new values; the \
         'filters' parameter determines which records are affected. Be careful with filter \
         conditions - if they match many records, all of them will be updated. Returns the \
         updated records after modification.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(table = %params.table))]
    pub fn execute(params: &UpdateRecordsParams, gateway: &SupabaseClient) -> CallToolResult {
        info!("Update records tool called for table '{}'", params.table);

        let table = match validate_table(&params.table) {
            Ok(t) => t,
            Err(result) => return *result,
        };

        if params.updates.is_empty() {
            return error_result("'updates' must contain at least one field");
        }

        let clauses = match parse_filter_arg(Some(&params.filters)) {
            Ok(c) => c,
            Err(result) => return *result,
        };
        // An unfiltered update would rewrite the whole table.
        if clauses.is_empty() {
            return error_result("'filters' must contain at least one condition");
        }

        match gateway.update_records(table, &params.updates, &clauses) {
            Ok(records) => {
                let count = records.len();
                let summary = format!("Updated {} record(s) in '{}'", count, table);
                structured_result(
                    summary,
                    UpdateRecordsResult {
                        table: table.to_string(),
                        records,
                        count,
                    },
                )
            }
            Err(e) => {
                error!("Update records failed: {:?}", e);
                error_result(&format!("Failed to update records in '{}': {}", table, e))
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<UpdateRecordsParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<UpdateRecordsResult>().into()),
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
                let params: UpdateRecordsParams =
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
