//! Error types and handling for the MCP server.
//!
//! This module defines the error type returned while starting the server.
//! Errors raised during a tool call never reach it: they are rendered as tool
//! reports instead.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The SonarQube client could not be built.
    #[error("Upstream error: {0}")]
    Upstream(#[from] super::sonarqube::UpstreamError),

    /// Configuration-related errors. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
