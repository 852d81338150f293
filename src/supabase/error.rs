//! Gateway error types.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while talking to the Supabase REST API.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// A filter map entry could not be translated into a query condition.
    #[error("Invalid filter for column '{column}': {reason}")]
    InvalidFilter { column: String, reason: String },

    /// The HTTP request itself failed (connection, TLS, ...).
    #[error("Request to Supabase failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service answered with a non-success status.
    #[error("Supabase API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected row list.
    #[error("Invalid response from Supabase: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Error body returned by PostgREST on failed requests.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl SupabaseError {
    /// Create a new "invalid filter" error.
    pub fn invalid_filter(column: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFilter {
            column: column.into(),
            reason: reason.into(),
        }
    }

    /// Build an API error from a non-success response body.
    ///
    /// PostgREST reports failures as `{"message": ..., "code": ...,
    /// "details": ..., "hint": ...}`; anything else is carried verbatim.
    pub fn api(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => {
                let mut message = parsed
                    .message
                    .unwrap_or_else(|| body.trim().to_string());
                if let Some(details) = parsed.details {
                    message.push_str(&format!(" ({})", details));
                }
                if let Some(hint) = parsed.hint {
                    message.push_str(&format!(" Hint: {}", hint));
                }
                message
            }
            Err(_) => {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "no error details provided".to_string()
                } else {
                    trimmed.to_string()
                }
            }
        };
        Self::Api { status, message }
    }
}
