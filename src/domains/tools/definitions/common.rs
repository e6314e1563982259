//! Common utilities shared across SonarQube tools.
//!
//! Argument decoding, defaults and the fallbacks used when the upstream
//! payload omits a field.

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use tracing::{error, warn};

use crate::core::sonarqube::UpstreamError;
use crate::domains::tools::ToolError;
use crate::domains::tools::report::Report;

/// Placeholder for a missing text field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing status field.
pub const UNKNOWN: &str = "UNKNOWN";

/// Largest page size SonarQube accepts on search endpoints.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Default page number.
pub fn default_page() -> u32 {
    1
}

/// Validate and clamp a page size to the range SonarQube accepts (1-500).
pub fn validate_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

/// Pages are 1-based.
pub fn validate_page(page: u32) -> u32 {
    page.max(1)
}

/// Decode a tool's typed parameters from the raw argument object.
pub fn parse_params<P>(arguments: JsonObject) -> Result<P, ToolError>
where
    P: DeserializeOwned,
{
    serde_json::from_value(serde_json::Value::Object(arguments)).map_err(|e| {
        warn!("Rejected tool arguments: {}", e);
        ToolError::invalid_arguments(e.to_string())
    })
}

/// Join values into the comma-separated form SonarQube expects, or `None`
/// when there is nothing to send.
pub fn comma_joined<T: AsRef<str>>(values: &[T]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(
            values
                .iter()
                .map(|v| v.as_ref())
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// Field value or `N/A`.
pub fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

/// Log an upstream failure and turn it into an error report.
pub fn upstream_failure(tool: &str, err: UpstreamError) -> Report {
    error!(
        tool,
        status = err.status_code(),
        timeout = err.is_timeout(),
        "SonarQube request failed: {}",
        err
    );
    Report::from(ToolError::from(err))
}
