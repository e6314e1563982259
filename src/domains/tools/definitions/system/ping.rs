//! Connectivity check against the SonarQube server.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::core::sonarqube::{SonarQubeClient, UpstreamError, models::SystemStatus};
use crate::domains::tools::definitions::common::{UNKNOWN, parse_params, upstream_failure};
use crate::domains::tools::report::Report;

/// The ping tool takes no parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PingParams {}

/// Ping tool - reports whether SonarQube answers `api/system/status`.
pub struct PingTool;

impl PingTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "ping_sonarqube";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Check whether the SonarQube server is reachable and report its status.";

    /// Endpoint queried by this tool.
    const ENDPOINT: &'static str = "system/status";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(_params: &PingParams, client: &SonarQubeClient) -> Report {
        info!("Pinging SonarQube at {}", client.base_url());

        match client.get::<SystemStatus>(Self::ENDPOINT).await {
            Ok(status) => {
                let mut report = Report::new();
                report.line(format!(
                    "SonarQube is reachable. Status: {}",
                    status.status.as_deref().unwrap_or(UNKNOWN)
                ));
                if let Some(version) = status.version.as_deref() {
                    report.line(format!("Version: {}", version));
                }
                report
            }
            Err(e @ UpstreamError::Transport(_)) => {
                warn!("SonarQube ping failed: {}", e);
                Report::failure(format!("Failed to connect: {}", e))
            }
            Err(e) => upstream_failure(Self::NAME, e),
        }
    }

    /// Decode raw arguments and execute.
    pub async fn handle(arguments: JsonObject, client: &SonarQubeClient) -> Report {
        match parse_params::<PingParams>(arguments) {
            Ok(params) => Self::execute(&params, client).await,
            Err(e) => e.into(),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<PingParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}
