//! Issue summary tool.
//!
//! Fetches a single page of up to 500 issues for a project and tallies them
//! by severity and by status. No further pages are requested, so for larger
//! projects the tallies cover a subset of the reported total; the report
//! says so when that happens.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::{ISSUES_ENDPOINT, IssueSearchQuery};
use crate::core::sonarqube::SonarQubeClient;
use crate::core::sonarqube::models::{IssueSearch, IssueStatus, Severity};
use crate::domains::tools::definitions::common::{MAX_PAGE_SIZE, parse_params, upstream_failure};
use crate::domains::tools::report::Report;

/// Parameters for the issue summary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuesSummaryParams {
    /// Project key.
    #[schemars(description = "Project key")]
    pub project_key: String,
}

/// Issue summary tool.
pub struct IssuesSummaryTool;

impl IssuesSummaryTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_project_issues_summary";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get a summary of a project's issues, counted by severity and by status.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project = %params.project_key))]
    pub async fn execute(params: &IssuesSummaryParams, client: &SonarQubeClient) -> Report {
        info!("Summarizing issues");

        let query = IssueSearchQuery {
            ps: MAX_PAGE_SIZE,
            component_keys: Some(params.project_key.clone()),
            ..Default::default()
        };

        let result = match client
            .get_with_query::<_, IssueSearch>(ISSUES_ENDPOINT, &query)
            .await
        {
            Ok(result) => result,
            Err(e) => return upstream_failure(Self::NAME, e),
        };

        let total = result.total.unwrap_or(0);
        let fetched = result.issues.len();

        let mut report = Report::new();
        report
            .line(format!("Issues summary - {}", params.project_key))
            .line(format!("Total: {}", total));

        if result.issues.is_empty() {
            report.blank().empty("No issues found.");
            return report;
        }

        report.blank().line("By severity:");
        for severity in Severity::ALL {
            let count = result
                .issues
                .iter()
                .filter(|issue| issue.has_severity(severity))
                .count();
            if count > 0 {
                report.item(1, format!("{}: {}", severity, count));
            }
        }

        report.blank().line("By status:");
        for status in IssueStatus::ALL {
            let count = result
                .issues
                .iter()
                .filter(|issue| issue.has_status(status))
                .count();
            if count > 0 {
                report.item(1, format!("{}: {}", status, count));
            }
        }

        if total > fetched as u64 {
            warn!("Summary limited to {} of {} issues", fetched, total);
            report.blank().line(format!(
                "Note: counts cover the first {} of {} issues.",
                fetched, total
            ));
        }

        report
    }

    /// Decode raw arguments and execute.
    pub async fn handle(arguments: JsonObject, client: &SonarQubeClient) -> Report {
        match parse_params::<IssuesSummaryParams>(arguments) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => e.into(),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<IssuesSummaryParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
