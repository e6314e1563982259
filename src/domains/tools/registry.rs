//! Tool Registry - the tool catalog and name-based dispatch.
//!
//! Both transports go through this registry: `get_all_tools()` feeds
//! `tools/list` and `call_tool()` answers `tools/call`.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{debug, warn};

use crate::core::config::Config;
use crate::core::sonarqube::{SonarQubeClient, UpstreamResult};

use super::definitions::{
    IssuesSummaryTool, ListProjectsTool, PingTool, ProjectMeasuresTool, QualityGateTool,
    SearchIssuesTool,
};
use super::error::ToolError;
use super::report::Report;

/// Tool registry - owns the SonarQube client every tool call goes through.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    client: SonarQubeClient,
}

impl ToolRegistry {
    /// Create a registry around an existing client.
    pub fn new(client: SonarQubeClient) -> Self {
        Self { client }
    }

    /// Create a registry from the server configuration.
    pub fn from_config(config: &Arc<Config>) -> UpstreamResult<Self> {
        Ok(Self::new(SonarQubeClient::new(config.sonarqube.clone())?))
    }

    /// Get all tool names, in catalog order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            SearchIssuesTool::NAME,
            ProjectMeasuresTool::NAME,
            QualityGateTool::NAME,
            ListProjectsTool::NAME,
            IssuesSummaryTool::NAME,
            PingTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Deterministic and side-effect free; the order is the catalog order.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            SearchIssuesTool::to_tool(),
            ProjectMeasuresTool::to_tool(),
            QualityGateTool::to_tool(),
            ListProjectsTool::to_tool(),
            IssuesSummaryTool::to_tool(),
            PingTool::to_tool(),
        ]
    }

    /// Run the named tool and return its report.
    ///
    /// Never fails: unknown names, bad arguments and upstream errors all come
    /// back as failure reports.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> Report {
        let arguments = arguments.unwrap_or_default();
        debug!(tool = name, "Dispatching tool call");

        match name {
            SearchIssuesTool::NAME => SearchIssuesTool::handle(arguments, &self.client).await,
            ProjectMeasuresTool::NAME => ProjectMeasuresTool::handle(arguments, &self.client).await,
            QualityGateTool::NAME => QualityGateTool::handle(arguments, &self.client).await,
            ListProjectsTool::NAME => ListProjectsTool::handle(arguments, &self.client).await,
            IssuesSummaryTool::NAME => IssuesSummaryTool::handle(arguments, &self.client).await,
            PingTool::NAME => PingTool::handle(arguments, &self.client).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                ToolError::not_found(name).into()
            }
        }
    }

    /// Run the named tool and render the MCP result.
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        self.dispatch(name, arguments).await.into_result()
    }
}
