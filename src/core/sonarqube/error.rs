//! Upstream client error types.

use thiserror::Error;

/// Result type for SonarQube API calls.
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Errors that can occur while talking to the SonarQube Web API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request could not be sent or the connection failed (includes timeouts).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code returned by SonarQube.
        status: u16,
        /// Reason phrase, followed by SonarQube's own error messages if any.
        message: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("Invalid response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The query parameters could not be encoded.
    #[error("Invalid query parameters: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

impl UpstreamError {
    /// Build a status error from the response status and body.
    ///
    /// SonarQube reports failures as `{"errors":[{"msg":"..."}]}`; those
    /// messages are appended to the reason phrase when present.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unexpected status");
        let details: Vec<String> = serde_json::from_str::<ApiErrors>(body)
            .map(|e| e.errors.into_iter().filter_map(|m| m.msg).collect())
            .unwrap_or_default();

        let message = if details.is_empty() {
            reason.to_string()
        } else {
            format!("{} ({})", reason, details.join("; "))
        };

        Self::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// HTTP status code associated with this failure, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::Query(_) => None,
        }
    }

    /// Whether the failure was the request timeout expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

#[derive(serde::Deserialize)]
struct ApiErrors {
    #[serde(default)]
    errors: Vec<ApiErrorMessage>,
}

#[derive(serde::Deserialize)]
struct ApiErrorMessage {
    msg: Option<String>,
}
