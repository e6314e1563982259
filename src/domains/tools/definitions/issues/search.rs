//! Issue search tool.
//!
//! Runs one page of `api/issues/search` with optional project, severity and
//! status filters, then summarizes the page grouped by severity.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::{ISSUES_ENDPOINT, IssueSearchQuery};
use crate::core::sonarqube::SonarQubeClient;
use crate::core::sonarqube::models::{Issue, IssueSearch, IssueStatus, Severity};
use crate::domains::tools::definitions::common::{
    NOT_AVAILABLE, comma_joined, default_page, or_na, parse_params, upstream_failure,
    validate_page, validate_page_size,
};
use crate::domains::tools::report::{Report, truncate};

/// Issues shown in detail per severity group.
pub const ISSUES_PER_SEVERITY: usize = 5;

/// Issue messages are cut to this many characters.
pub const MESSAGE_MAX_CHARS: usize = 80;

fn default_page_size() -> u32 {
    100
}

/// Parameters for issue search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchIssuesParams {
    /// Project keys to restrict the search to.
    #[schemars(description = "Project keys to search in (e.g. ['com.example:my-service'])")]
    #[serde(default)]
    pub project_keys: Option<Vec<String>>,

    /// Severities to keep.
    #[schemars(description = "Filter by severity")]
    #[serde(default)]
    pub severities: Option<Vec<Severity>>,

    /// Statuses to keep.
    #[schemars(description = "Filter by status")]
    #[serde(default)]
    pub statuses: Option<Vec<IssueStatus>>,

    /// Page size (default: 100, max: 500).
    #[schemars(description = "Page size (default: 100, max: 500)")]
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Page number (default: 1).
    #[schemars(description = "Page number (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,
}

impl Default for SearchIssuesParams {
    fn default() -> Self {
        Self {
            project_keys: None,
            severities: None,
            statuses: None,
            page_size: default_page_size(),
            page: default_page(),
        }
    }
}

impl SearchIssuesParams {
    fn to_query(&self) -> IssueSearchQuery {
        let severities: Vec<&str> = self
            .severities
            .iter()
            .flatten()
            .map(|s| s.as_str())
            .collect();
        let statuses: Vec<&str> = self
            .statuses
            .iter()
            .flatten()
            .map(|s| s.as_str())
            .collect();

        IssueSearchQuery {
            ps: validate_page_size(self.page_size),
            p: Some(validate_page(self.page)),
            component_keys: self.project_keys.as_deref().and_then(comma_joined),
            severities: comma_joined(&severities),
            statuses: comma_joined(&statuses),
        }
    }
}

/// Issue search tool.
pub struct SearchIssuesTool;

impl SearchIssuesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_issues";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search SonarQube issues across projects. Can filter by project, severity and status; results are grouped by severity.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(page = params.page, page_size = params.page_size))]
    pub async fn execute(params: &SearchIssuesParams, client: &SonarQubeClient) -> Report {
        let query = params.to_query();
        info!("Searching issues: {:?}", query);

        let result = match client
            .get_with_query::<_, IssueSearch>(ISSUES_ENDPOINT, &query)
            .await
        {
            Ok(result) => result,
            Err(e) => return upstream_failure(Self::NAME, e),
        };

        let page_index = result
            .paging
            .page_index
            .unwrap_or(u64::from(query.p.unwrap_or(1)));
        let page_count = result.paging.page_count(u64::from(query.ps));

        let mut report = Report::new();
        report
            .line(format!("Total issues: {}", result.total.unwrap_or(0)))
            .line(format!("Page {} of {}", page_index, page_count))
            .line(format!("Issues on this page: {}", result.issues.len()));

        if result.issues.is_empty() {
            report.blank().empty("No issues found.");
            return report;
        }

        for severity in Severity::ALL {
            let group: Vec<&Issue> = result
                .issues
                .iter()
                .filter(|issue| issue.has_severity(severity))
                .collect();
            if group.is_empty() {
                continue;
            }

            report
                .blank()
                .line(format!("{}: {} issues", severity, group.len()));

            for issue in group.iter().take(ISSUES_PER_SEVERITY) {
                write_issue(&mut report, issue);
            }

            if group.len() > ISSUES_PER_SEVERITY {
                report.item(
                    1,
                    format!("... and {} more issues", group.len() - ISSUES_PER_SEVERITY),
                );
            }
        }

        info!("Reported {} issues", result.issues.len());
        report
    }

    /// Decode raw arguments and execute.
    pub async fn handle(arguments: JsonObject, client: &SonarQubeClient) -> Report {
        match parse_params::<SearchIssuesParams>(arguments) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => e.into(),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<SearchIssuesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

fn write_issue(report: &mut Report, issue: &Issue) {
    let location = match issue.start_line() {
        Some(line) => format!("Line {}", line),
        None => NOT_AVAILABLE.to_string(),
    };

    report
        .item(
            1,
            format!(
                "- {}",
                truncate(or_na(issue.message.as_deref()), MESSAGE_MAX_CHARS)
            ),
        )
        .item(2, format!("Component: {}", or_na(issue.component.as_deref())))
        .item(2, format!("Location: {}", location))
        .item(2, format!("Status: {}", or_na(issue.status.as_deref())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SonarQubeConfig;
    use crate::domains::tools::report::{ELLIPSIS, Outcome};
    use serde_json::{Value, json};
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> SonarQubeClient {
        SonarQubeClient::new(SonarQubeConfig::new(base_url, "test-token")).unwrap()
    }

    fn arguments(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    fn issue(severity: &str, message: &str) -> Value {
        json!({
            "severity": severity,
            "status": "OPEN",
            "message": message,
            "component": "org:alpha:src/lib.rs",
            "textRange": {"startLine": 10, "endLine": 10}
        })
    }

    async fn mount_issues(server: &MockServer, issues: Vec<Value>) {
        let total = issues.len();
        Mock::given(method("GET"))
            .and(path("/api/issues/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": total,
                "paging": {"pageIndex": 1, "pageSize": 100, "total": total},
                "issues": issues
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_default_query_omits_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/issues/search"))
            .and(query_param("ps", "100"))
            .and(query_param("p", "1"))
            .and(query_param_is_missing("componentKeys"))
            .and(query_param_is_missing("severities"))
            .and(query_param_is_missing("statuses"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"issues": []})))
            .expect(1)
            .mount(&server)
            .await;

        let report = SearchIssuesTool::handle(JsonObject::new(), &client_for(&server.uri())).await;

        assert_eq!(report.outcome(), Outcome::Empty);
        assert!(report.render().contains("Total issues: 0"));
        assert!(report.render().contains("Page 1 of 1"));
    }

    #[tokio::test]
    async fn test_filters_are_comma_joined() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/issues/search"))
            .and(query_param("componentKeys", "org:alpha,org:beta"))
            .and(query_param("severities", "BLOCKER,CRITICAL"))
            .and(query_param("statuses", "OPEN,REOPENED"))
            .and(query_param("ps", "20"))
            .and(query_param("p", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"issues": []})))
            .expect(1)
            .mount(&server)
            .await;

        let args = arguments(json!({
            "projectKeys": ["org:alpha", "org:beta"],
            "severities": ["BLOCKER", "CRITICAL"],
            "statuses": ["OPEN", "REOPENED"],
            "pageSize": 20,
            "page": 3
        }));
        SearchIssuesTool::handle(args, &client_for(&server.uri())).await;
    }

    #[tokio::test]
    async fn test_seven_blockers_show_five_and_remainder() {
        let server = MockServer::start().await;
        let issues = (0..7)
            .map(|i| issue("BLOCKER", &format!("Blocker number {}", i)))
            .collect();
        mount_issues(&server, issues).await;

        let report = SearchIssuesTool::handle(
            arguments(json!({"severities": ["BLOCKER"]})),
            &client_for(&server.uri()),
        )
        .await;

        let detailed = report.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(detailed, 5);
        assert!(report.render().contains("BLOCKER: 7 issues"));
        assert!(report.lines().any(|l| l == "... and 2 more issues"));
        assert!(!report.render().contains("Blocker number 5"));
    }

    #[tokio::test]
    async fn test_groups_follow_severity_order() {
        let server = MockServer::start().await;
        mount_issues(
            &server,
            vec![
                issue("MINOR", "minor one"),
                issue("BLOCKER", "blocker one"),
                issue("MAJOR", "major one"),
            ],
        )
        .await;

        let report =
            SearchIssuesTool::execute(&SearchIssuesParams::default(), &client_for(&server.uri()))
                .await;
        let text = report.render();

        let blocker = text.find("BLOCKER: 1 issues").unwrap();
        let major = text.find("MAJOR: 1 issues").unwrap();
        let minor = text.find("MINOR: 1 issues").unwrap();
        assert!(blocker < major && major < minor);
        assert!(!text.contains("CRITICAL"));
        assert!(!text.contains("INFO"));
    }

    #[tokio::test]
    async fn test_issue_details() {
        let server = MockServer::start().await;
        mount_issues(
            &server,
            vec![
                issue("MAJOR", "Remove this unused import."),
                json!({"severity": "MAJOR"}),
            ],
        )
        .await;

        let report =
            SearchIssuesTool::execute(&SearchIssuesParams::default(), &client_for(&server.uri()))
                .await;
        let text = report.render();

        assert!(text.contains("  - Remove this unused import.\n"));
        assert!(text.contains("    Component: org:alpha:src/lib.rs"));
        assert!(text.contains("    Location: Line 10"));
        assert!(text.contains("    Status: OPEN"));
        assert!(text.contains("  - N/A\n    Component: N/A\n    Location: N/A\n    Status: N/A"));
    }

    #[tokio::test]
    async fn test_long_messages_truncated_to_80_chars() {
        let server = MockServer::start().await;
        let long_message = "a".repeat(81) + &"b".repeat(40);
        mount_issues(&server, vec![issue("CRITICAL", &long_message)]).await;

        let report =
            SearchIssuesTool::execute(&SearchIssuesParams::default(), &client_for(&server.uri()))
                .await;

        let message_line = report.lines().find(|l| l.starts_with("- ")).unwrap();
        let message = message_line.trim_start_matches("- ");
        assert_eq!(message, format!("{}{}", "a".repeat(80), ELLIPSIS));
    }

    #[tokio::test]
    async fn test_page_count_from_paging() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 250,
                "paging": {"pageIndex": 2, "pageSize": 100, "total": 250},
                "issues": [issue("INFO", "note")]
            })))
            .mount(&server)
            .await;

        let params = SearchIssuesParams {
            page: 2,
            ..Default::default()
        };
        let report = SearchIssuesTool::execute(&params, &client_for(&server.uri())).await;
        let text = report.render();

        assert!(text.contains("Total issues: 250"));
        assert!(text.contains("Page 2 of 3"));
        assert!(text.contains("Issues on this page: 1"));
    }

    #[tokio::test]
    async fn test_unknown_severity_rejected() {
        let client = client_for("http://127.0.0.1:1");
        let report =
            SearchIssuesTool::handle(arguments(json!({"severities": ["URGENT"]})), &client).await;

        assert!(report.is_failure());
        assert!(report.render().contains("Invalid arguments"));
    }

    #[tokio::test]
    async fn test_malformed_fields_keep_the_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/issues/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total": 2,
                "paging": null,
                "issues": [
                    {"severity": "MAJOR", "status": "OPEN", "message": 42},
                    {"severity": "MAJOR", "status": "OPEN", "message": "Remove this unused import"}
                ]
            })))
            .mount(&server)
            .await;

        let report = SearchIssuesTool::handle(JsonObject::new(), &client_for(&server.uri())).await;
        let text = report.render();

        assert_eq!(report.outcome(), Outcome::Success);
        assert!(text.contains("Total issues: 2"));
        assert!(text.contains("Page 1 of 1"));
        assert!(text.contains("MAJOR: 2 issues"));
        assert!(text.contains("  - 42"));
        assert!(text.contains("  - Remove this unused import"));
    }
}
