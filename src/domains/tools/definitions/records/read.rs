//! Read records tool definition.
//!
//! Fetches rows from a table with filtering, sorting, and pagination.

use std::collections::BTreeMap;
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

/// Parameters for the read tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadRecordsParams {
    /// Name of the table to read from.
    #[schemars(description = "Name of the table to read from")]
    pub table: String,

    /// Columns to select, comma-separated; `*` selects everything.
    #[serde(default = "default_columns")]
    #[schemars(description = "Columns to select (comma-separated or * for all)")]
    pub columns: String,

    /// Filtering conditions; a literal value means equality, an operator
    /// object selects the comparison (eq, neq, gt, gte, lt, lte, like,
    /// ilike, is, in).
    #[schemars(
        description = "Filtering conditions as key-value pairs (e.g. {\"column\": \"value\"} for equality, {\"column\": {\"gte\": 10}} for comparisons)"
    )]
    pub filters: Option<Map<String, Value>>,

    /// Maximum number of records to return.
    #[schemars(description = "Maximum number of records to return")]
    pub limit: Option<u64>,

    /// Number of records to skip for pagination.
    #[schemars(description = "Number of records to skip for pagination")]
    pub offset: Option<u64>,

    /// Sorting options as column:direction pairs.
    #[schemars(
        description = "Sorting options as column:direction pairs (e.g. {\"created_at\": \"desc\"})"
    )]
    pub order_by: Option<BTreeMap<String, String>>,
}

fn default_columns() -> String {
    "*".to_string()
}

// ============================================================================
// Structured Output
// ============================================================================

/// Result of a read operation.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ReadRecordsResult {
    /// Table the records were read from.
    pub table: String,
    /// Matching records; empty when nothing matched.
    pub records: Vec<Row>,
    /// Number of records returned.
    pub count: usize,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Read tool - fetches records from a Supabase table.
pub struct ReadRecordsTool;

impl ReadRecordsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "read_records";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read records from a Supabase database table with flexible querying options: \
         filtering, sorting, and pagination. Common use cases: retrieve all records from a table, \
         fetch specific records based on conditions, get paginated results for large datasets, \
         or retrieve only specific columns. The result is always an array of record objects, \
         even if only one record is found; an empty array means nothing matched.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(table = %params.table))]
    pub fn execute(params: &ReadRecordsParams, gateway: &SupabaseClient) -> CallToolResult {
        info!("Read records tool called for table '{}'", params.table);

        let table = match validate_table(&params.table) {
            Ok(t) => t,
            Err(result) => return *result,
        };

        let columns = params.columns.trim();
        if columns.is_empty() {
            return error_result("'columns' must be a non-empty selection (use \"*\" for all)");
        }

        let clauses = match parse_filter_arg(params.filters.as_ref()) {
            Ok(c) => c,
            Err(result) => return *result,
        };

        match gateway.read_records(
            table,
            columns,
            &clauses,
            params.order_by.as_ref(),
            params.limit,
            params.offset,
        ) {
            Ok(records) => {
                let count = records.len();
                let summary = format!("Read {} record(s) from '{}'", count, table);
                structured_result(
                    summary,
                    ReadRecordsResult {
                        table: table.to_string(),
                        records,
                        count,
                    },
                )
            }
            Err(e) => {
                error!("Read records failed: {:?}", e);
                error_result(&format!("Failed to read records from '{}': {}", table, e))
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ReadRecordsParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ReadRecordsResult>().into()),
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
                let params: ReadRecordsParams =
                    serde_json::from_value(Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                // The gateway blocks on the network round-trip.
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
    fn test_params_defaults() {
        let json = r#"{"table": "users"}"#;
        let params: ReadRecordsParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.columns, "*");
        assert!(params.filters.is_none());
        assert!(params.limit.is_none());
        assert!(params.offset.is_none());
        assert!(params.order_by.is_none());
    }

    #[test]
    fn test_params_missing_table_is_rejected() {
        let json = r#"{"columns": "id"}"#;
        assert!(serde_json::from_str::<ReadRecordsParams>(json).is_err());
    }

    #[test]
    fn test_params_full() {
        let params: ReadRecordsParams = serde_json::from_value(json!({
            "table": "users",
            "columns": "id,name",
            "filters": {"age": {"gte": 18}},
            "limit": 10,
            "offset": 5,
            "order_by": {"name": "asc"}
        }))
        .unwrap();
        assert_eq!(params.columns, "id,name");
        assert_eq!(params.limit, Some(10));
        assert_eq!(params.order_by.unwrap()["name"], "asc");
    }

    #[test]
    fn test_execute_rejects_empty_table() {
        let params: ReadRecordsParams =
            serde_json::from_value(json!({"table": "  "})).unwrap();
        let result = ReadRecordsTool::execute(&params, &test_gateway());
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("table"));
    }

    #[test]
    fn test_execute_rejects_empty_columns() {
        let params: ReadRecordsParams =
            serde_json::from_value(json!({"table": "users", "columns": " "})).unwrap();
        let result = ReadRecordsTool::execute(&params, &test_gateway());
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("columns"));
    }

    #[test]
    fn test_execute_rejects_unknown_operator_before_any_call() {
        let params: ReadRecordsParams = serde_json::from_value(json!({
            "table": "users",
            "filters": {"id": {"between": [1, 2]}}
        }))
        .unwrap();
        let result = ReadRecordsTool::execute(&params, &test_gateway());
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("unknown operator"));
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = ReadRecordsTool::to_tool();
        assert_eq!(tool.name.as_ref(), "read_records");
        assert!(tool.output_schema.is_some());
    }
}
