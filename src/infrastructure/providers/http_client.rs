//! # HTTP Client Utilities
//!
//! Shared HTTP client for provider adapters.
//!
//! This module provides a reusable HTTP client wrapper with:
//! - Configurable timeouts
//! - Per-provider authentication (HTTP basic or API-key header)
//! - JSON serialization/deserialization
//! - Uniform error mapping
//!
//! # Examples
//!
//! ```ignore
//! use parcelgate::infrastructure::providers::http_client::{AuthScheme, HttpClient};
//!
//! let client = HttpClient::with_auth(
//!     5000,
//!     AuthScheme::api_key("Authorization", "secret"),
//! )?;
//! let response: MyResponse = client.get("https://api.example.com/endpoint").await?;
//! ```

use crate::infrastructure::providers::error::{ProviderError, ProviderResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Authentication applied to every request of a provider client.
#[derive(Debug, Clone)]
pub enum AuthScheme {
    /// No authentication.
    None,
    /// HTTP basic authentication.
    Basic {
        /// User name.
        username: String,
        /// Password.
        password: String,
    },
    /// A static API-key header.
    ApiKey {
        /// Header name.
        header: String,
        /// Header value.
        key: String,
    },
}

impl AuthScheme {
    /// Creates a basic-auth scheme.
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates an API-key header scheme.
    #[must_use]
    pub fn api_key(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ApiKey {
            header: header.into(),
            key: key.into(),
        }
    }
}

/// HTTP client wrapper for provider adapters.
///
/// Provides a convenient interface for making JSON requests with proper
/// error handling, timeout configuration and per-provider authentication.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
    /// Authentication applied to every request.
    auth: AuthScheme,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout and no
    /// authentication.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InternalError` if the client cannot be
    /// created.
    pub fn new(timeout_ms: u64) -> ProviderResult<Self> {
        Self::with_auth(timeout_ms, AuthScheme::None)
    }

    /// Creates a new HTTP client with the specified timeout and
    /// authentication scheme.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::InternalError` if the client cannot be
    /// created.
    pub fn with_auth(timeout_ms: u64, auth: AuthScheme) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| {
                ProviderError::internal_error(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            timeout_ms,
            auth,
        })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Connection`/`Timeout` if the request fails
    /// and `ProviderError::ProtocolError` if the response cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ProviderResult<T> {
        let response = self
            .apply_auth(self.client.get(url))
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a GET request with query parameters and deserializes the JSON
    /// response.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Connection`/`Timeout` if the request fails
    /// and `ProviderError::ProtocolError` if the response cannot be parsed.
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> ProviderResult<T> {
        let response = self
            .apply_auth(self.client.get(url).query(params))
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a POST request with a JSON body and deserializes the JSON
    /// response.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Connection`/`Timeout` if the request fails
    /// and `ProviderError::ProtocolError` if the response cannot be parsed.
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> ProviderResult<T> {
        let response = self
            .apply_auth(self.client.post(url).json(body))
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            AuthScheme::None => request,
            AuthScheme::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
            AuthScheme::ApiKey { header, key } => request.header(header.as_str(), key.as_str()),
        }
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ProviderResult<T> {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                ProviderError::protocol_error(format!("failed to parse response: {}", e))
            })
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(Self::map_status_error(status, &error_body))
        }
    }

    /// Maps a reqwest error to a ProviderError.
    fn map_reqwest_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::timeout_with_duration("request timed out", self.timeout_ms)
        } else if error.is_connect() {
            ProviderError::connection(format!("connection failed: {}", error))
        } else {
            ProviderError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps an HTTP status code to a ProviderError.
    fn map_status_error(status: StatusCode, body: &str) -> ProviderError {
        match status {
            StatusCode::BAD_REQUEST => {
                ProviderError::invalid_request(format!("bad request: {}", body))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ProviderError::authentication(format!("authentication failed: {}", body))
            }
            StatusCode::NOT_FOUND => {
                ProviderError::protocol_error(format!("resource not found: {}", body))
            }
            StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited("rate limit exceeded"),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => {
                ProviderError::connection(format!("server error ({}): {}", status, body))
            }
            _ => ProviderError::protocol_error(format!("HTTP error ({}): {}", status, body)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct Payload {
        value: u32,
    }

    #[test]
    fn new_client() {
        let client = HttpClient::new(5000);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().timeout_ms(), 5000);
    }

    #[tokio::test]
    async fn get_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": 7
            })))
            .mount(&server)
            .await;

        let client = HttpClient::new(5000).unwrap();
        let payload: Payload = client.get(&format!("{}/data", server.uri())).await.unwrap();
        assert_eq!(payload.value, 7);
    }

    #[tokio::test]
    async fn get_with_params_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(query_param("from", "DE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": 1
            })))
            .mount(&server)
            .await;

        let client = HttpClient::new(5000).unwrap();
        let payload: Payload = client
            .get_with_params(&format!("{}/data", server.uri()), &[("from", "DE")])
            .await
            .unwrap();
        assert_eq!(payload.value, 1);
    }

    #[tokio::test]
    async fn api_key_header_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .and(header("Authorization", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": 2
            })))
            .mount(&server)
            .await;

        let client =
            HttpClient::with_auth(5000, AuthScheme::api_key("Authorization", "secret")).unwrap();
        let payload: Payload = client.get(&format!("{}/data", server.uri())).await.unwrap();
        assert_eq!(payload.value, 2);
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = HttpClient::new(5000).unwrap();
        let result: ProviderResult<Payload> = client.get(&server.uri()).await;
        assert!(matches!(
            result,
            Err(ProviderError::Authentication { .. })
        ));
    }

    #[tokio::test]
    async fn server_error_maps_to_connection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpClient::new(5000).unwrap();
        let result: ProviderResult<Payload> = client.get(&server.uri()).await;
        assert!(matches!(result, Err(ProviderError::Connection { .. })));
    }

    #[tokio::test]
    async fn malformed_body_maps_to_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = HttpClient::new(5000).unwrap();
        let result: ProviderResult<Payload> = client.get(&server.uri()).await;
        assert!(matches!(result, Err(ProviderError::ProtocolError { .. })));
    }
}
