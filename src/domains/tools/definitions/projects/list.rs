//! Project listing tool.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::core::sonarqube::{SonarQubeClient, models::ProjectSearch};
use crate::domains::tools::definitions::common::{
    default_page, or_na, parse_params, upstream_failure, validate_page,
};
use crate::domains::tools::report::Report;

/// Parameters for the project listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsParams {
    /// Page number (1-based).
    #[schemars(description = "Page number (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,
}

impl Default for ListProjectsParams {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ProjectSearchQuery {
    p: u32,
}

/// List projects tool.
pub struct ListProjectsTool;

impl ListProjectsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_projects";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "List the projects available on the SonarQube server, one page at a time.";

    const ENDPOINT: &'static str = "projects/search";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(page = params.page))]
    pub async fn execute(params: &ListProjectsParams, client: &SonarQubeClient) -> Report {
        let query = ProjectSearchQuery {
            p: validate_page(params.page),
        };
        info!("Listing projects, page {}", query.p);

        let result = match client
            .get_with_query::<_, ProjectSearch>(Self::ENDPOINT, &query)
            .await
        {
            Ok(result) => result,
            Err(e) => return upstream_failure(Self::NAME, e),
        };

        let mut report = Report::new();
        report
            .line(format!(
                "Total projects: {}",
                result.paging.total.unwrap_or(0)
            ))
            .blank();

        if result.components.is_empty() {
            report.empty("No projects found.");
            return report;
        }

        for project in &result.components {
            report.line(format!(
                "- {}: {}",
                or_na(project.key.as_deref()),
                or_na(project.name.as_deref())
            ));
        }

        info!("Listed {} projects", result.components.len());
        report
    }

    /// Decode raw arguments and execute.
    pub async fn handle(arguments: JsonObject, client: &SonarQubeClient) -> Report {
        match parse_params::<ListProjectsParams>(arguments) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => e.into(),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListProjectsParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
