//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server:
//! error handling, configuration, the upstream SonarQube client, server
//! lifecycle management and transport layer abstractions.

pub mod config;
pub mod error;
pub mod server;
pub mod sonarqube;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use sonarqube::SonarQubeClient;
pub use transport::{TransportConfig, TransportService};
