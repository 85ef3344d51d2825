//! API client for the generation service
//!
//! One `POST` per submission, no retries. The body is decoded whatever the status
//! code, since the service reports refusals as `400` with a JSON error.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::art::{decode_response, GenerationRequest, GenerationResult};
use crate::config::ApiConfig;

const DEFAULT_ENDPOINT: &str = "http://localhost:8080/generate";

/// Failures to complete a request or to understand its response.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("{0}")]
    Transport(String),
}

/// API client for the generate endpoint
#[derive(Debug, Clone)]
pub struct ArtClient {
    client: Client,
    endpoint: String,
}

impl ArtClient {
    /// Create a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_settings(&config.endpoint, config.timeout_seconds)
    }

    /// Create with a custom endpoint and no timeout
    #[cfg(test)]
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self::with_settings(endpoint, 0)
    }

    fn with_settings(endpoint: &str, timeout_seconds: u64) -> Self {
        let mut builder = Client::builder();
        if timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_seconds));
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        ArtClient {
            client,
            endpoint: normalize_endpoint(endpoint),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submit text and style, returning the art or the service's refusal.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ApiError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            style = %request.style,
            chars = request.text.chars().count(),
            "sending generation request"
        );

        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let result = decode_response(&body);
        match &result {
            Ok(GenerationResult::Art(_)) => {
                tracing::debug!(%status, "generation succeeded")
            }
            Ok(GenerationResult::Rejected(message)) => {
                tracing::info!(%status, %message, "generation rejected")
            }
            Err(err) => tracing::warn!(%status, error = %err, "undecodable response"),
        }
        result
    }
}

fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return DEFAULT_ENDPOINT.to_string();
    }
    trimmed.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::art::ResultView;
    use axum::{
        http::{header, HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::Value;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;
    use tokio::sync::Mutex;

    async fn spawn_server(app: Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (addr, handle)
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(
            normalize_endpoint("http://localhost:8080/generate/"),
            "http://localhost:8080/generate"
        );
        assert_eq!(normalize_endpoint("  "), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_client_from_default_config() {
        let client = ArtClient::from_config(&ApiConfig::default());
        assert_eq!(client.endpoint(), "http://localhost:8080/generate");
    }

    #[tokio::test]
    async fn posts_json_body_and_returns_art() {
        let captured: Arc<Mutex<Option<(Value, Option<String>)>>> = Arc::new(Mutex::new(None));
        let captured_for_route = Arc::clone(&captured);
        let backend = Router::new().route(
            "/generate",
            post(move |headers: HeaderMap, Json(payload): Json<Value>| {
                let captured = Arc::clone(&captured_for_route);
                async move {
                    let content_type = headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    *captured.lock().await = Some((payload, content_type));
                    Json(serde_json::json!({ "art": " _ \n|_|\n" }))
                }
            }),
        );
        let (addr, handle) = spawn_server(backend).await;

        let client = ArtClient::with_endpoint(&format!("http://{addr}/generate"));
        let result = client
            .generate(&GenerationRequest::new("Hi", "shadow"))
            .await
            .unwrap();
        assert_eq!(result, GenerationResult::Art(" _ \n|_|\n".to_string()));

        let (payload, content_type) = captured.lock().await.take().unwrap();
        assert_eq!(payload, serde_json::json!({"text": "Hi", "style": "shadow"}));
        assert_eq!(content_type.as_deref(), Some("application/json"));

        handle.abort();
    }

    #[tokio::test]
    async fn bad_request_with_error_body_is_a_rejection() {
        let backend = Router::new().route(
            "/generate",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "art": "", "error": "Invalid style selected" })),
                )
            }),
        );
        let (addr, handle) = spawn_server(backend).await;

        let client = ArtClient::with_endpoint(&format!("http://{addr}/generate"));
        let result = client
            .generate(&GenerationRequest::new("Hi", "gothic"))
            .await
            .unwrap();
        assert_eq!(
            result,
            GenerationResult::Rejected("Invalid style selected".to_string())
        );

        handle.abort();
    }

    #[tokio::test]
    async fn non_json_body_is_a_transport_error() {
        let backend = Router::new().route(
            "/generate",
            post(|| async { (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed") }),
        );
        let (addr, handle) = spawn_server(backend).await;

        let client = ArtClient::with_endpoint(&format!("http://{addr}/generate"));
        let err = client
            .generate(&GenerationRequest::new("Hi", "standard"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));

        handle.abort();
    }

    fn slow_backend(delay: Duration) -> Router {
        Router::new().route(
            "/generate",
            post(move || async move {
                tokio::time::sleep(delay).await;
                Json(serde_json::json!({ "art": "SLOW" }))
            }),
        )
    }

    #[tokio::test]
    async fn configured_timeout_is_a_connection_error() {
        let (addr, handle) = spawn_server(slow_backend(Duration::from_secs(3))).await;

        let client = ArtClient::from_config(&ApiConfig {
            endpoint: format!("http://{addr}/generate"),
            timeout_seconds: 1,
        });
        let outcome = client
            .generate(&GenerationRequest::new("Hi", "standard"))
            .await;
        assert!(matches!(outcome, Err(ApiError::Network(_))));

        let mut view = ResultView::default();
        view.apply(&outcome);
        assert!(view.text().starts_with("Error connecting to server: "));
        assert!(!view.download_enabled());

        handle.abort();
    }

    #[tokio::test]
    async fn zero_timeout_waits_for_slow_service() {
        let (addr, handle) = spawn_server(slow_backend(Duration::from_millis(1500))).await;

        let client = ArtClient::from_config(&ApiConfig {
            endpoint: format!("http://{addr}/generate"),
            timeout_seconds: 0,
        });
        let result = client
            .generate(&GenerationRequest::new("Hi", "standard"))
            .await
            .unwrap();
        assert_eq!(result, GenerationResult::Art("SLOW".to_string()));

        handle.abort();
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ArtClient::with_endpoint(&format!("http://{addr}/generate"));
        let err = client
            .generate(&GenerationRequest::new("Hi", "standard"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(!err.to_string().is_empty());
    }
}
