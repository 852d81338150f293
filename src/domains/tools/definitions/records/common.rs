//! Common utilities shared across the record tools.
//!
//! Argument shape checks live here so every validation failure is reported
//! before a remote call is made.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::supabase::{FilterClause, parse_filters};

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create a success result with a text summary plus structured content.
pub fn structured_result(summary: String, data: impl Serialize) -> CallToolResult {
    match serde_json::to_value(&data) {
        Ok(value) => CallToolResult {
            content: vec![Content::text(summary)],
            structured_content: Some(value),
            is_error: Some(false),
            meta: None,
        },
        Err(e) => error_result(&format!("Failed to encode result: {}", e)),
    }
}

/// Check the table argument. A blank name never reaches the remote service.
pub fn validate_table(table: &str) -> Result<&str, Box<CallToolResult>> {
    let trimmed = table.trim();
    if trimmed.is_empty() {
        Err(Box::new(error_result("'table' must be a non-empty string")))
    } else {
        Ok(trimmed)
    }
}

/// Parse an optional filter map into validated clauses.
pub fn parse_filter_arg(
    filters: Option<&Map<String, Value>>,
) -> Result<Vec<FilterClause>, Box<CallToolResult>> {
    match filters {
        Some(map) => {
            parse_filters(map).map_err(|e| Box::new(error_result(&e.to_string())))
        }
        None => Ok(Vec::new()),
    }
}

/// Extract the text summary of a result (test support).
#[cfg(test)]
pub(crate) fn result_text(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => text.text.clone(),
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_result_is_flagged() {
        let result = error_result("boom");
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(result_text(&result), "boom");
    }

    #[test]
    fn test_structured_result_carries_both_parts() {
        let result = structured_result("done".to_string(), json!({"count": 2}));
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "done");
        assert_eq!(result.structured_content.unwrap()["count"], 2);
    }

    #[test]
    fn test_validate_table_trims() {
        assert_eq!(validate_table(" users ").unwrap(), "users");
        assert!(validate_table("   ").is_err());
    }

    #[test]
    fn test_parse_filter_arg_absent_is_empty() {
        assert!(parse_filter_arg(None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_filter_arg_reports_bad_operator() {
        let map = json!({"id": {"wat": 1}}).as_object().cloned().unwrap();
        let result = parse_filter_arg(Some(&map)).unwrap_err();
        assert!(result_text(&result).contains("unknown operator"));
    }
}
