//! Project measures tool.
//!
//! Fetches metric values (coverage, lines of code, complexity, ...) for a
//! single project from `api/measures/component`.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::core::sonarqube::{SonarQubeClient, models::ComponentMeasures};
use crate::domains::tools::definitions::common::{
    comma_joined, or_na, parse_params, upstream_failure,
};
use crate::domains::tools::report::Report;

/// Metrics requested when the caller does not name any.
pub const DEFAULT_METRIC_KEYS: [&str; 7] = [
    "coverage",
    "ncloc",
    "complexity",
    "violations",
    "code_smells",
    "bugs",
    "vulnerabilities",
];

fn default_metric_keys() -> Vec<String> {
    DEFAULT_METRIC_KEYS.iter().map(|k| k.to_string()).collect()
}

/// Parameters for the measures lookup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeasuresParams {
    /// Project key.
    #[schemars(description = "Project key (e.g. 'com.example:my-service')")]
    pub project_key: String,

    /// Metric keys to fetch.
    #[schemars(
        description = "Metric keys to fetch (e.g. ['coverage', 'ncloc', 'complexity', 'violations'])"
    )]
    #[serde(default = "default_metric_keys")]
    pub metric_keys: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeasuresQuery {
    component: String,
    metric_keys: String,
}

/// Project measures tool.
pub struct ProjectMeasuresTool;

impl ProjectMeasuresTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_project_measures";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get metrics for a SonarQube project (coverage, complexity, lines of code, bugs, vulnerabilities, etc.).";

    const ENDPOINT: &'static str = "measures/component";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(project = %params.project_key))]
    pub async fn execute(params: &ProjectMeasuresParams, client: &SonarQubeClient) -> Report {
        // An explicitly empty list falls back to the defaults too.
        let metric_keys = comma_joined(&params.metric_keys)
            .unwrap_or_else(|| DEFAULT_METRIC_KEYS.join(","));

        info!("Fetching measures [{}]", metric_keys);

        let query = MeasuresQuery {
            component: params.project_key.clone(),
            metric_keys,
        };

        let result = match client
            .get_with_query::<_, ComponentMeasures>(Self::ENDPOINT, &query)
            .await
        {
            Ok(result) => result,
            Err(e) => return upstream_failure(Self::NAME, e),
        };

        let mut report = Report::new();
        report
            .line(format!("Measures for project: {}", params.project_key))
            .blank();

        let measures = &result.component.measures;
        if measures.is_empty() {
            report.empty("No measures returned.");
            return report;
        }

        for measure in measures {
            report.line(format!(
                "{}: {}",
                or_na(measure.metric.as_deref()),
                or_na(measure.value.as_deref())
            ));
        }

        report
    }

    /// Decode raw arguments and execute.
    pub async fn handle(arguments: JsonObject, client: &SonarQubeClient) -> Report {
        match parse_params::<ProjectMeasuresParams>(arguments) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => e.into(),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ProjectMeasuresParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
