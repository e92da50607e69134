#![allow(dead_code)]

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pantry_service::config::{AnthropicConfig, Environment, PantryConfig, ProductLookupConfig};
use pantry_service::services::metrics::init_metrics;
use pantry_service::{build_router, AppState};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use tower::util::ServiceExt;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "sk-ant-test-key";
pub const TEST_MODEL: &str = "claude-test-model";

pub struct TestApp {
    pub router: Router,
    /// Stands in for the completion API.
    pub completion: MockServer,
    /// Stands in for Open Food Facts.
    pub primary: MockServer,
    /// Stands in for UPC Item DB.
    pub secondary: MockServer,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Response body is not JSON")
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::with_api_key(Some(TEST_API_KEY)).await
    }

    pub async fn with_api_key(api_key: Option<&str>) -> Self {
        init_metrics();

        let completion = MockServer::start().await;
        let primary = MockServer::start().await;
        let secondary = MockServer::start().await;

        let config = PantryConfig {
            common: CoreConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            environment: Environment::Dev,
            service_name: "pantry-service-test".to_string(),
            log_level: "error".to_string(),
            otlp_endpoint: None,
            anthropic: AnthropicConfig {
                api_key: api_key.map(|k| Secret::new(k.to_string())),
                base_url: completion.uri(),
                model: TEST_MODEL.to_string(),
                api_version: "2023-06-01".to_string(),
            },
            products: ProductLookupConfig {
                open_food_facts_url: primary.uri(),
                upc_item_db_url: secondary.uri(),
            },
            upstream_timeout_seconds: Some(5),
        };

        let state = AppState::from_config(config).expect("Failed to build application state");

        TestApp {
            router: build_router(state),
            completion,
            primary,
            secondary,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        self.request(Method::POST, uri, Some(&body.to_string())).await
    }

    /// JSON bodies of every request the completion mock received.
    pub async fn completion_requests(&self) -> Vec<serde_json::Value> {
        self.completion
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).expect("Upstream request body is not JSON"))
            .collect()
    }
}

/// A successful completion envelope with the given text blocks.
pub fn completion_envelope(texts: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": TEST_MODEL,
        "content": texts
            .iter()
            .map(|t| serde_json::json!({ "type": "text", "text": t }))
            .collect::<Vec<_>>(),
        "stop_reason": "end_turn"
    })
}
