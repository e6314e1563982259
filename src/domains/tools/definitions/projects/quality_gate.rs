//! Quality gate status tool.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::core::sonarqube::{SonarQubeClient, models::QualityGateResponse};
use crate::domains::tools::definitions::common::{UNKNOWN, or_na, parse_params, upstream_failure};
use crate::domains::tools::report::Report;

/// Parameters for the quality gate lookup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualityGateParams {
    /// Project key.
    #[schemars(description = "Project key")]
    pub project_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QualityGateQuery<'a> {
    project_key: &'a str,
}

/// Quality gate status tool.
pub struct QualityGateTool;

impl QualityGateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_quality_gate_status";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the Quality Gate status of a SonarQube project, with the status of each condition.";

    const ENDPOINT: &'static str = "qualitygates/project_status";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project = %params.project_key))]
    pub async fn execute(params: &QualityGateParams, client: &SonarQubeClient) -> Report {
        info!("Fetching quality gate status");

        let query = QualityGateQuery {
            project_key: &params.project_key,
        };

        let gate = match client
            .get_with_query::<_, QualityGateResponse>(Self::ENDPOINT, &query)
            .await
        {
            Ok(response) => response.into_status(),
            Err(e) => return upstream_failure(Self::NAME, e),
        };

        let mut report = Report::new();
        report
            .line(format!(
                "Quality Gate Status: {}",
                gate.status.as_deref().unwrap_or(UNKNOWN)
            ))
            .blank()
            .line("Conditions:");

        for condition in &gate.conditions {
            report.item(
                1,
                format!(
                    "{}: {} (Atual: {}, Limite: {})",
                    or_na(condition.metric_key.as_deref()),
                    or_na(condition.status.as_deref()),
                    or_na(condition.actual_value.as_deref()),
                    or_na(condition.error_threshold.as_deref())
                ),
            );
        }

        report
    }

    /// Decode raw arguments and execute.
    pub async fn handle(arguments: JsonObject, client: &SonarQubeClient) -> Report {
        match parse_params::<QualityGateParams>(arguments) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => e.into(),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<QualityGateParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
