//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while assembling the tool surface.
///
/// Argument and execution failures are reported to the client through the
/// tool result itself; only registration problems surface here.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The router and the registry disagree about the tool set.
    #[error("Tool registration mismatch: {0}")]
    Registration(String),
}

impl ToolError {
    /// Create a new registration error.
    pub fn registration(msg: impl Into<String>) -> Self {
        Self::Registration(msg.into())
    }
}
