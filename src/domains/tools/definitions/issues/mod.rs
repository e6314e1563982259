//! Issue tools backed by `api/issues/search`.
//!
//! - `search`: filtered, paginated issue listing grouped by severity
//! - `summary`: per-severity and per-status tallies for one project

pub mod search;
pub mod summary;

pub use search::{SearchIssuesParams, SearchIssuesTool};
pub use summary::{IssuesSummaryParams, IssuesSummaryTool};

use serde::Serialize;

/// Endpoint shared by the issue tools.
const ISSUES_ENDPOINT: &str = "issues/search";

/// Query string for `api/issues/search`. Filters left as `None` are not sent.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct IssueSearchQuery {
    ps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    p: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component_keys: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    severities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statuses: Option<String>,
}
