//! Tool definitions module.
//!
//! One file per tool, grouped by the part of SonarQube they query.

pub mod common;
pub mod issues;
pub mod projects;
pub mod system;

pub use issues::{IssuesSummaryParams, IssuesSummaryTool, SearchIssuesParams, SearchIssuesTool};
pub use projects::{
    ListProjectsParams, ListProjectsTool, ProjectMeasuresParams, ProjectMeasuresTool,
    QualityGateParams, QualityGateTool,
};
pub use system::{PingParams, PingTool};
