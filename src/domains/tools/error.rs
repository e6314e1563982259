//! Tool-specific error types.

use thiserror::Error;

use crate::core::sonarqube::UpstreamError;

/// Errors that can occur during tool operations.
///
/// None of these escape a tool call: the dispatcher renders them as an error
/// report so the serving loop keeps going.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The SonarQube request failed.
    #[error("SonarQube request failed: {0}")]
    Upstream(#[from] UpstreamError),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
