//! HTTP client for the SonarQube Web API.

use reqwest::{Client, header};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{UpstreamError, UpstreamResult};
use crate::core::config::SonarQubeConfig;

/// Path prefix of every Web API endpoint.
pub const API_PREFIX: &str = "api";

/// Timeout applied to every upstream request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Read-only SonarQube client.
///
/// Cheap to clone: the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct SonarQubeClient {
    http: Client,
    config: SonarQubeConfig,
}

impl SonarQubeClient {
    /// Create a client for the given connection settings.
    pub fn new(config: SonarQubeConfig) -> UpstreamResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Build `<base>/api/<endpoint>`, tolerating slashes on either side.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim().trim_end_matches('/'),
            API_PREFIX,
            endpoint.trim_start_matches('/')
        )
    }

    /// GET an endpoint without query parameters.
    pub async fn get<T>(&self, endpoint: &str) -> UpstreamResult<T>
    where
        T: DeserializeOwned,
    {
        const NO_QUERY: &[(&str, &str)] = &[];
        self.get_with_query(endpoint, NO_QUERY).await
    }

    /// GET an endpoint with query parameters and decode the JSON body.
    pub async fn get_with_query<Q, T>(&self, endpoint: &str, query: &Q) -> UpstreamResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut url = self.endpoint_url(endpoint);
        let query_string = serde_urlencoded::to_string(query)?;
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }

        debug!(url = %url, "GET request");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.token, Some(""))
            .send()
            .await
            .inspect_err(|e| warn!(url = %url, error = %e, "SonarQube request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), "SonarQube returned an error status");
            return Err(UpstreamError::from_response(status, &body));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::{Value, json};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> SonarQubeClient {
        SonarQubeClient::new(SonarQubeConfig::new(base_url, "test-token")).unwrap()
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let client = client_for("https://sonar.example.com/");
        assert_eq!(
            client.endpoint_url("/system/status"),
            "https://sonar.example.com/api/system/status"
        );

        let client = client_for("https://sonar.example.com/sonar");
        assert_eq!(
            client.endpoint_url("issues/search"),
            "https://sonar.example.com/sonar/api/issues/search"
        );
    }

    #[tokio::test]
    async fn test_get_sends_auth_and_accept_headers() {
        let server = MockServer::start().await;
        let expected_auth = format!("Basic {}", STANDARD.encode("test-token:"));

        Mock::given(method("GET"))
            .and(path("/api/system/status"))
            .and(header("Authorization", expected_auth.as_str()))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "UP"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let body: Value = client.get("system/status").await.unwrap();
        assert_eq!(body["status"], "UP");
    }

    #[tokio::test]
    async fn test_get_with_query_encodes_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/measures/component"))
            .and(query_param("component", "my:project"))
            .and(query_param("metricKeys", "coverage,bugs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"component": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let query = [("component", "my:project"), ("metricKeys", "coverage,bugs")];
        let body: Value = client
            .get_with_query("measures/component", &query)
            .await
            .unwrap();
        assert!(body.get("component").is_some());
    }

    #[tokio::test]
    async fn test_error_status_is_captured() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/qualitygates/project_status"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"errors": [{"msg": "Project 'x' not found"}]})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client
            .get::<Value>("qualitygates/project_status")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(404));
        assert!(err.to_string().contains("Project 'x' not found"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let err = client.get::<Value>("system/status").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on port 1.
        let client = client_for("http://127.0.0.1:1");
        let err = client.get::<Value>("system/status").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport(_)));
        assert_eq!(err.status_code(), None);
    }
}
