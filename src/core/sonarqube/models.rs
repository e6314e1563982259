//! Response models for the SonarQube Web API endpoints we query.
//!
//! Every field is optional or defaulted: SonarQube versions differ in what
//! they return, and a missing or wrongly typed field must never fail a tool
//! call. Lists drop entries they cannot read instead of failing as a whole. Rendering
//! code substitutes "N/A", "UNKNOWN" or 0 at the read site.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Vocabulary
// ============================================================================

/// Issue severity, in descending order of importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Blocker,
    Critical,
    Major,
    Minor,
    Info,
}

impl Severity {
    /// All severities in report order.
    pub const ALL: [Severity; 5] = [
        Severity::Blocker,
        Severity::Critical,
        Severity::Major,
        Severity::Minor,
        Severity::Info,
    ];

    /// Wire name used by SonarQube.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Blocker => "BLOCKER",
            Severity::Critical => "CRITICAL",
            Severity::Major => "MAJOR",
            Severity::Minor => "MINOR",
            Severity::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueStatus {
    Open,
    Confirmed,
    Reopened,
    Resolved,
    Closed,
}

impl IssueStatus {
    /// All statuses in report order.
    pub const ALL: [IssueStatus; 5] = [
        IssueStatus::Open,
        IssueStatus::Confirmed,
        IssueStatus::Reopened,
        IssueStatus::Resolved,
        IssueStatus::Closed,
    ];

    /// Wire name used by SonarQube.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueStatus::Open => "OPEN",
            IssueStatus::Confirmed => "CONFIRMED",
            IssueStatus::Reopened => "REOPENED",
            IssueStatus::Resolved => "RESOLVED",
            IssueStatus::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Shared
// ============================================================================

/// Pagination block returned by search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Paging {
    #[serde(deserialize_with = "lenient_u64")]
    pub page_index: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub page_size: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
}

impl Paging {
    /// Number of pages implied by `total` and `page_size`, never less than 1.
    pub fn page_count(&self, fallback_page_size: u64) -> u64 {
        let total = self.total.unwrap_or(0);
        let page_size = self.page_size.unwrap_or(fallback_page_size).max(1);
        total.div_ceil(page_size).max(1)
    }
}

// ============================================================================
// api/system/status
// ============================================================================

/// Payload of `api/system/status`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub version: Option<String>,
}

// ============================================================================
// api/projects/search
// ============================================================================

/// Payload of `api/projects/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectSearch {
    #[serde(deserialize_with = "lenient")]
    pub paging: Paging,
    #[serde(deserialize_with = "lenient_vec")]
    pub components: Vec<Project>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "lenient_string")]
    pub key: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
}

// ============================================================================
// api/issues/search
// ============================================================================

/// Payload of `api/issues/search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueSearch {
    #[serde(deserialize_with = "lenient_u64")]
    pub total: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub paging: Paging,
    #[serde(deserialize_with = "lenient_vec")]
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Issue {
    #[serde(deserialize_with = "lenient_string")]
    pub key: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub severity: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub component: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub text_range: Option<TextRange>,
}

impl Issue {
    /// Whether this issue carries the given severity.
    pub fn has_severity(&self, severity: Severity) -> bool {
        self.severity.as_deref() == Some(severity.as_str())
    }

    /// Whether this issue carries the given status.
    pub fn has_status(&self, status: IssueStatus) -> bool {
        self.status.as_deref() == Some(status.as_str())
    }

    /// First line of the issue's text range, if it has one.
    pub fn start_line(&self) -> Option<u64> {
        self.text_range.as_ref().and_then(|r| r.start_line)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextRange {
    #[serde(deserialize_with = "lenient_u64")]
    pub start_line: Option<u64>,
    #[serde(deserialize_with = "lenient_u64")]
    pub end_line: Option<u64>,
}

// ============================================================================
// api/measures/component
// ============================================================================

/// Payload of `api/measures/component`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentMeasures {
    #[serde(deserialize_with = "lenient")]
    pub component: MeasuredComponent,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MeasuredComponent {
    #[serde(deserialize_with = "lenient_string")]
    pub key: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub measures: Vec<Measure>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Measure {
    #[serde(deserialize_with = "lenient_string")]
    pub metric: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

// ============================================================================
// api/qualitygates/project_status
// ============================================================================

/// Payload of `api/qualitygates/project_status`.
///
/// SonarQube nests the verdict under `projectStatus`; a flat payload is
/// accepted as well.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualityGateResponse {
    #[serde(deserialize_with = "lenient")]
    pub project_status: Option<ProjectStatus>,
    #[serde(flatten)]
    pub top_level: ProjectStatus,
}

impl QualityGateResponse {
    /// The quality gate verdict, wherever the server put it.
    pub fn into_status(self) -> ProjectStatus {
        self.project_status.unwrap_or(self.top_level)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectStatus {
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub conditions: Vec<GateCondition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GateCondition {
    #[serde(deserialize_with = "lenient_string")]
    pub metric_key: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub actual_value: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub error_threshold: Option<String>,
}

// ============================================================================
// Lenient field decoding
// ============================================================================

/// Accept strings, numbers or booleans for display-only values.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accept non-negative integers, written as numbers or numeric strings.
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Decode a nested object, falling back to its default when it is `null` or
/// has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Decode a list, skipping entries that cannot be read. `null` or a non-array
/// becomes an empty list.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_tolerates_missing_fields() {
        let issue: Issue = serde_json::from_value(json!({})).unwrap();
        assert!(issue.severity.is_none());
        assert!(issue.start_line().is_none());

        let issue: Issue =
            serde_json::from_value(json!({"severity": "MAJOR", "textRange": {"startLine": 12}}))
                .unwrap();
        assert!(issue.has_severity(Severity::Major));
        assert_eq!(issue.start_line(), Some(12));
    }

    #[test]
    fn test_paging_page_count() {
        let paging = Paging {
            page_index: Some(1),
            page_size: Some(100),
            total: Some(250),
        };
        assert_eq!(paging.page_count(100), 3);
        assert_eq!(Paging::default().page_count(100), 1);
    }

    #[test]
    fn test_quality_gate_nested_and_flat() {
        let nested: QualityGateResponse = serde_json::from_value(json!({
            "projectStatus": {"status": "ERROR", "conditions": [{"metricKey": "coverage"}]}
        }))
        .unwrap();
        let status = nested.into_status();
        assert_eq!(status.status.as_deref(), Some("ERROR"));
        assert_eq!(status.conditions.len(), 1);

        let flat: QualityGateResponse =
            serde_json::from_value(json!({"status": "OK", "conditions": []})).unwrap();
        assert_eq!(flat.into_status().status.as_deref(), Some("OK"));
    }

    #[test]
    fn test_lenient_measure_value() {
        let measure: Measure =
            serde_json::from_value(json!({"metric": "ncloc", "value": 1200})).unwrap();
        assert_eq!(measure.value.as_deref(), Some("1200"));

        let measure: Measure = serde_json::from_value(json!({"metric": "coverage"})).unwrap();
        assert!(measure.value.is_none());
    }

    #[test]
    fn test_severity_wire_names() {
        let names: Vec<_> = Severity::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["BLOCKER", "CRITICAL", "MAJOR", "MINOR", "INFO"]);
        assert_eq!(
            serde_json::to_value(IssueStatus::Reopened).unwrap(),
            json!("REOPENED")
        );
    }

    #[test]
    fn test_wrongly_typed_fields_fall_back() {
        let status: SystemStatus = serde_json::from_value(json!({"status": 1})).unwrap();
        assert_eq!(status.status.as_deref(), Some("1"));

        let projects: ProjectSearch =
            serde_json::from_value(json!({"paging": null, "components": null})).unwrap();
        assert!(projects.components.is_empty());
        assert!(projects.paging.total.is_none());

        let search: IssueSearch = serde_json::from_value(json!({
            "total": "2",
            "paging": "oops",
            "issues": [
                {"severity": "MAJOR", "message": 42, "textRange": null},
                {"severity": "MINOR", "textRange": {"startLine": "7"}},
                "not an issue"
            ]
        }))
        .unwrap();
        assert_eq!(search.total, Some(2));
        assert_eq!(search.issues.len(), 2);
        assert_eq!(search.issues[0].message.as_deref(), Some("42"));
        assert!(search.issues[0].start_line().is_none());
        assert_eq!(search.issues[1].start_line(), Some(7));
    }

    #[test]
    fn test_quality_gate_null_sections() {
        let gate: QualityGateResponse = serde_json::from_value(json!({
            "projectStatus": {"status": "OK", "conditions": null}
        }))
        .unwrap();
        let status = gate.into_status();
        assert_eq!(status.status.as_deref(), Some("OK"));
        assert!(status.conditions.is_empty());

        let measures: ComponentMeasures =
            serde_json::from_value(json!({"component": null})).unwrap();
        assert!(measures.component.measures.is_empty());
    }
}
