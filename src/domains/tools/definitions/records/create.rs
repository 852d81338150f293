//! Create records tool definition.
//!
//! Inserts one or more rows into a table in a single remote call.

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

use super::common::{error_result, structured_result, validate_table};

// ============================================================================
// Tool Parameters
// ============================================================================

/// A single record object or an array of record objects.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RecordsArg {
    /// One record.
    Single(Map<String, Value>),
    /// Several records, inserted together.
    Batch(Vec<Map<String, Value>>),
}

impl RecordsArg {
    /// Flatten into the row list submitted to the remote service.
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            Self::Single(record) => vec![record],
            Self::Batch(records) => records,
        }
    }
}

/// Parameters for the create tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateRecordsParams {
    /// Name of the table to create records in.
    #[schemars(description = "Name of the table to create records in")]
    pub table: String,

    /// Record(s) to create.
    #[schemars(description = "A single record object or array of record objects to create")]
    pub records: RecordsArg,
}

// ============================================================================
// Structured Output
// ============================================================================

/// Result of a create operation.
#[derive(Debug, Serialize, JsonSchema)]
pub struct CreateRecordsResult {
    /// Table the records were created in.
    pub table: String,
    /// Created records, including server-assigned ids and timestamps.
    pub records: Vec<Row>,
    /// Number of records created.
    pub count: usize,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Create tool - inserts records into a Supabase table.
pub struct CreateRecordsTool;

impl CreateRecordsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_records";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create one or more records in a Supabase database table. Accepts a single record \
         object or an array of record objects; a list is inserted in one request. Returns the \
         created records with their assigned IDs and timestamps (if applicable). Make sure the \
         data structure matches the table schema to avoid validation errors.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(table = %params.table))]
    pub fn execute(params: &CreateRecordsParams, gateway: &SupabaseClient) -> CallToolResult {
        info!("Create records tool called for table '{}'", params.table);

        let table = match validate_table(&params.table) {
            Ok(t) => t,
            Err(result) => return *result,
        };

        let rows = params.records.clone().into_rows();
        if rows.is_empty() {
            return error_result("'records' must contain at least one record");
        }

        match gateway.create_records(table, &rows) {
            Ok(records) => {
                let count = records.len();
                let summary = format!("Created {} record(s) in '{}'", count, table);
                structured_result(
                    summary,
                    CreateRecordsResult {
                        table: table.to_string(),
                        records,
                        count,
                    },
                )
            }
            Err(e) => {
                error!("Create records failed: {:?}", e);
                error_result(&format!("Failed to create records in '{}': {}", table, e))
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<CreateRecordsParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<CreateRecordsResult>().into()),
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
                let params: CreateRecordsParams =
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
    fn test_single_record_parses() {
        let params: CreateRecordsParams = serde_json::from_value(json!({
            "table": "users",
            "records": {"name": "Ann"}
        }))
        .unwrap();
        assert_eq!(params.records.into_rows().len(), 1);
    }

    #[test]
    fn test_record_list_parses() {
        let params: CreateRecordsParams = serde_json::from_value(json!({
            "table": "users",
            "records": [{"name": "Ann"}, {"name": "Ben"}]
        }))
        .unwrap();
        assert_eq!(params.records.into_rows().len(), 2);
    }

    #[test]
    fn test_scalar_records_value_is_rejected() {
        let result = serde_json::from_value::<CreateRecordsParams>(json!({
            "table": "users",
            "records": "not-a-record"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_records_is_rejected() {
        let result = serde_json::from_value::<CreateRecordsParams>(json!({"table": "users"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_execute_rejects_empty_batch() {
        let params: CreateRecordsParams = serde_json::from_value(json!({
            "table": "users",
            "records": []
        }))
        .unwrap();
        let result = CreateRecordsTool::execute(&params, &test_gateway());
        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).contains("at least one record"));
    }

    #[test]
    fn test_execute_rejects_empty_table() {
        let params: CreateRecordsParams = serde_json::from_value(json!({
            "table": "",
            "records": {"name": "Ann"}
        }))
        .unwrap();
        let result = CreateRecordsTool::execute(&params, &test_gateway());
        assert!(result.is_error.unwrap_or(false));
    }

    #[test]
    fn test_to_tool_metadata() {
        let tool = CreateRecordsTool::to_tool();
        assert_eq!(tool.name.as_ref(), "create_records");
        assert!(tool.description.as_ref().unwrap().contains("array"));
    }
}
