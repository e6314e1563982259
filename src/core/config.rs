//! Configuration management for the MCP server.
//!
//! Configuration is read once at startup, mostly from environment variables,
//! and then shared read-only (`Arc<Config>`) with every component that needs it.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable holding the SonarQube base URL.
pub const SONARQUBE_URL_VAR: &str = "SONARQUBE_URL";

/// Environment variable holding the SonarQube access token.
pub const SONARQUBE_TOKEN_VAR: &str = "SONARQUBE_TOKEN";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream SonarQube connection settings.
    pub sonarqube: SonarQubeConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Connection settings for the SonarQube Web API.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SonarQubeConfig {
    /// Base URL of the SonarQube instance, e.g. `https://sonar.example.com`.
    pub base_url: String,

    /// User token sent as the basic-auth username (empty password).
    pub token: String,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for SonarQubeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SonarQubeConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl SonarQubeConfig {
    /// Create connection settings from a base URL and token.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Check that both settings are present and the URL is absolute http(s).
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() || self.token.trim().is_empty() {
            return Err(Error::config(format!(
                "{} and {} must be set before starting the server",
                SONARQUBE_URL_VAR, SONARQUBE_TOKEN_VAR
            )));
        }

        let url = reqwest::Url::parse(self.base_url.trim())
            .map_err(|e| Error::config(format!("Invalid {}: {}", SONARQUBE_URL_VAR, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "{} must use http or https, got '{}'",
                SONARQUBE_URL_VAR,
                url.scheme()
            )));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "sonarqube-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            sonarqube: SonarQubeConfig::default(),
        }
    }
}

impl Config {
    /// Create a configuration with defaults and the given SonarQube settings.
    pub fn with_sonarqube(sonarqube: SonarQubeConfig) -> Self {
        Self {
            sonarqube,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// `SONARQUBE_URL` and `SONARQUBE_TOKEN` are required; a missing or invalid
    /// value is returned as [`Error::Config`] and must abort startup.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        config.sonarqube = SonarQubeConfig::new(
            std::env::var(SONARQUBE_URL_VAR).unwrap_or_default(),
            std::env::var(SONARQUBE_TOKEN_VAR).unwrap_or_default(),
        );
        config.sonarqube.validate()?;

        info!("SonarQube endpoint: {}", config.sonarqube.base_url);

        Ok(config)
    }
}
