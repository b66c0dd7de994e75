//! Inference API Client
//!
//! HTTP client for the hosted classifier endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;

/// Default content type for uploaded images
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Client configuration
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

/// Request body
#[derive(Debug, Clone)]
pub enum Payload {
    /// Sent as a JSON body
    Json(Value),
    /// Raw bytes (images)
    Binary { bytes: Vec<u8>, content_type: Option<String> },
}

impl Payload {
    /// `{"inputs": text}`
    pub fn text(text: &str) -> Self {
        Payload::Json(serde_json::json!({ "inputs": text }))
    }

    pub fn image(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Payload::Binary { bytes, content_type }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Json(_) => "json",
            Payload::Binary { .. } => "binary",
        }
    }
}

/// Inference errors. All of them abort the running workflow.
#[derive(Debug, Clone, Error)]
pub enum InferenceError {
    /// Non-success HTTP status
    #[error("inference API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// Body was not JSON at all
    #[error("invalid JSON response: {0}")]
    Decode(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

impl InferenceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            InferenceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            InferenceError::Timeout
        } else if e.is_decode() {
            InferenceError::Decode(e.to_string())
        } else if e.is_builder() {
            InferenceError::Client(e.to_string())
        } else {
            InferenceError::Network(e.to_string())
        }
    }
}

/// Inference collaborator: one classifier call, JSON back
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn invoke(&self, model: &str, payload: Payload) -> Result<Value, InferenceError>;
}

/// reqwest-backed inference client
pub struct InferenceClient {
    config: InferenceConfig,
    http_client: reqwest::Client,
}

impl InferenceClient {
    /// Create new inference client
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| InferenceError::Client(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    /// Check if a bearer token is configured
    pub fn has_token(&self) -> bool {
        self.config.token.is_some()
    }

    /// `<base>/<model>`
    pub fn endpoint_url(&self, model: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            model.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl InferenceBackend for InferenceClient {
    async fn invoke(&self, model: &str, payload: Payload) -> Result<Value, InferenceError> {
        let url = self.endpoint_url(model);
        log::debug!("Inference request: {} ({})", url, payload.kind());

        let mut request = self.http_client.post(&url).header(ACCEPT, "application/json");

        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        request = match payload {
            Payload::Json(body) => request.json(&body),
            Payload::Binary { bytes, content_type } => request
                .header(
                    CONTENT_TYPE,
                    content_type.unwrap_or_else(|| DEFAULT_IMAGE_CONTENT_TYPE.to_string()),
                )
                .body(bytes),
        };

        let response = request.send().await?;

        if response.status().is_success() {
            response.json::<Value>().await.map_err(|e| {
                if e.is_timeout() {
                    InferenceError::Timeout
                } else {
                    InferenceError::Decode(e.to_string())
                }
            })
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            log::error!("Inference call to {} failed ({}): {}", model, status, body);
            Err(InferenceError::Status { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_bytes, body_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> InferenceClient {
        InferenceClient::new(InferenceConfig {
            base_url: server.uri(),
            token: token.map(str::to_string),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_json_payload_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/org/emotion-model"))
            .and(header("authorization", "Bearer hf_test"))
            .and(header("accept", "application/json"))
            .and(body_json(json!({"inputs": "hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([[{"label": "joy", "score": 0.9}]])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("hf_test"));
        let value = client.invoke("org/emotion-model", Payload::text("hello")).await.unwrap();
        assert_eq!(value[0][0]["label"], "joy");
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        assert!(!client.has_token());
        client.invoke("m", Payload::text("x")).await.unwrap();

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_binary_payload_keeps_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/vision"))
            .and(header("content-type", "image/png"))
            .and(body_bytes(vec![1u8, 2, 3]))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"label": "cat", "score": 0.7}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let value = client
            .invoke("vision", Payload::image(vec![1, 2, 3], Some("image/png".into())))
            .await
            .unwrap();
        assert_eq!(value[0]["label"], "cat");
    }

    #[tokio::test]
    async fn test_non_success_status_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
            .mount(&server)
            .await;

        let client = client_for(&server, Some("bad"));
        let err = client.invoke("m", Payload::text("x")).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(err.is_auth_error());
        assert_eq!(err.to_string(), "inference API error 401: Invalid credentials");
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client.invoke("m", Payload::text("x")).await.unwrap_err();
        assert!(matches!(err, InferenceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = InferenceClient::new(InferenceConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            token: None,
            timeout_seconds: 2,
        })
        .unwrap();
        let err = client.invoke("m", Payload::text("x")).await.unwrap_err();
        assert!(matches!(err, InferenceError::Network(_) | InferenceError::Timeout));
    }

    #[test]
    fn test_endpoint_url_joins_cleanly() {
        let client = InferenceClient::new(InferenceConfig {
            base_url: "https://host/models/".to_string(),
            token: None,
            timeout_seconds: 1,
        })
        .unwrap();
        assert_eq!(client.endpoint_url("/a/b"), "https://host/models/a/b");
    }
}
