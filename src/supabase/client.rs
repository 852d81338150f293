//! Supabase REST client.
//!
//! One [`SupabaseClient`] is constructed at startup from configuration and
//! shared by every tool. Requests are blocking; tool routes move them off
//! the async runtime with `spawn_blocking`.

use std::collections::BTreeMap;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::config::SupabaseConfig;

use super::error::SupabaseError;
use super::filter::FilterClause;
use super::query::TableQuery;

/// A database row as returned by the REST API.
pub type Row = Map<String, Value>;

/// Client for the Supabase REST (PostgREST) API.
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    key: String,
}

impl SupabaseClient {
    /// Build a client from configuration.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            key: config.service_role_key.clone(),
        })
    }

    /// Read rows from a table with selection, filtering, sorting, and
    /// pagination applied in that order.
    pub fn read_records(
        &self,
        table: &str,
        columns: &str,
        filters: &[FilterClause],
        order_by: Option<&BTreeMap<String, String>>,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Vec<Row>, SupabaseError> {
        let mut query = TableQuery::new().select(columns).filters(filters);
        if let Some(order_by) = order_by {
            query = query.order(order_by);
        }
        let params = query.limit(limit).offset(offset).into_params();

        debug!(table, ?params, "executing read");
        let response = self.request(Method::GET, table).query(&params).send()?;
        Self::rows(response)
    }

    /// Insert one or more rows in a single request, returning the created
    /// rows with their server-assigned fields.
    pub fn create_records(&self, table: &str, records: &[Row]) -> Result<Vec<Row>, SupabaseError> {
        debug!(table, count = records.len(), "executing insert");
        let response = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(records)
            .send()?;
        Self::rows(response)
    }

    /// Update every row matching the filters, returning the updated rows.
    pub fn update_records(
        &self,
        table: &str,
        updates: &Row,
        filters: &[FilterClause],
    ) -> Result<Vec<Row>, SupabaseError> {
        let params = TableQuery::new().filters(filters).into_params();

        debug!(table, ?params, "executing update");
        let response = self
            .request(Method::PATCH, table)
            .header("Prefer", "return=representation")
            .query(&params)
            .json(updates)
            .send()?;
        Self::rows(response)
    }

    /// Delete every row matching the filters, returning the deleted rows as
    /// they were before deletion.
    pub fn delete_records(
        &self,
        table: &str,
        filters: &[FilterClause],
    ) -> Result<Vec<Row>, SupabaseError> {
        let params = TableQuery::new().filters(filters).into_params();

        debug!(table, ?params, "executing delete");
        let response = self
            .request(Method::DELETE, table)
            .header("Prefer", "return=representation")
            .query(&params)
            .send()?;
        Self::rows(response)
    }

    /// Start a request against a table endpoint with auth headers applied.
    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.http
            .request(method, url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Turn a response into a row list or a normalized error.
    fn rows(response: Response) -> Result<Vec<Row>, SupabaseError> {
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(SupabaseError::api(status.as_u16(), &body));
        }

        // PostgREST answers 2xx with an empty body when no representation
        // was requested.
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&body).map_err(SupabaseError::from)
    }
}

/// The service-role key must never appear in logs.
impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: "https://example.supabase.co/".to_string(),
            service_role_key: "service-role-secret".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = test_client();
        assert_eq!(client.base_url, "https://example.supabase.co");
    }

    #[test]
    fn test_debug_redacts_key() {
        let debug_str = format!("{:?}", test_client());
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("service-role-secret"));
    }

    // Integration tests against a live project (require SUPABASE_URL and
    // SUPABASE_SERVICE_ROLE_KEY plus a `todos` table; run with
    // cargo test -- --ignored)
    #[ignore]
    #[test]
    fn test_read_records_live() {
        let config = crate::core::Config::from_env().unwrap();
        let client = SupabaseClient::new(&config.supabase).unwrap();
        let rows = client
            .read_records("todos", "*", &[], None, Some(5), None)
            .unwrap();
        assert!(rows.len() <= 5);
    }

    #[ignore]
    #[test]
    fn test_create_update_delete_live() {
        let config = crate::core::Config::from_env().unwrap();
        let client = SupabaseClient::new(&config.supabase).unwrap();

        let record = json!({"title": "gateway roundtrip"})
            .as_object()
            .cloned()
            .unwrap();
        let created = client.create_records("todos", &[record]).unwrap();
        assert_eq!(created.len(), 1);

        let id = created[0].get("id").cloned().unwrap();
        let filters = crate::supabase::parse_filters(
            json!({"id": id}).as_object().unwrap(),
        )
        .unwrap();

        let updates = json!({"title": "gateway updated"})
            .as_object()
            .cloned()
            .unwrap();
        let updated = client.update_records("todos", &updates, &filters).unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].get("title"), Some(&json!("gateway updated")));

        let deleted = client.delete_records("todos", &filters).unwrap();
        assert_eq!(deleted.len(), 1);

        let remaining = client
            .read_records("todos", "*", &filters, None, None, None)
            .unwrap();
        assert!(remaining.is_empty());
    }
}
