//! SonarQube MCP Server Library
//!
//! A Model Context Protocol (MCP) server that gives AI agents read-only access
//! to a SonarQube instance: issues, measures, quality gates and projects.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the SonarQube client, the MCP
//!   server handler and the transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: the tool catalog, one file per tool, plus dispatch and
//!     report rendering
//!
//! # Example
//!
//! ```rust,no_run
//! use sonarqube_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
