mod common;

use axum::http::{Method, StatusCode};
use common::{completion_envelope, TestApp, TEST_API_KEY, TEST_MODEL};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

const URI: &str = "/api/generate-recipes";

#[tokio::test]
async fn returns_upstream_payload_verbatim() {
    let app = TestApp::spawn().await;
    let envelope = completion_envelope(&["1. Fried Rice Fiesta ..."]);

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", TEST_API_KEY))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope.clone()))
        .expect(1)
        .mount(&app.completion)
        .await;

    let response = app
        .post_json(URI, json!({ "itemList": "eggs (expires tomorrow), rice, scallions" }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), envelope);

    let sent = app.completion_requests().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["model"], TEST_MODEL);
    assert_eq!(sent[0]["max_tokens"], 1500);
    assert_eq!(sent[0]["messages"][0]["role"], "user");
    let prompt = sent[0]["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.starts_with(
        "I have these ingredients in my pantry: eggs (expires tomorrow), rice, scallions. "
    ));
    assert!(prompt.contains("3 creative recipes"));
}

#[tokio::test]
async fn credential_is_trimmed_before_sending() {
    let app = TestApp::with_api_key(Some("sk-ant-padded  \n")).await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-padded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_envelope(&["ok"])))
        .expect(1)
        .mount(&app.completion)
        .await;

    let response = app.post_json(URI, json!({ "itemList": "beans" })).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn missing_item_list_is_rejected_without_upstream_call() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.completion)
        .await;

    for body in [json!({}), json!({ "itemList": "" }), json!({ "itemList": null })] {
        let response = app.post_json(URI, body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json(), json!({ "error": "Item list is required" }));
    }

    let response = app.request(Method::POST, URI, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_api_key_is_a_config_error() {
    let app = TestApp::with_api_key(None).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.completion)
        .await;

    let response = app.post_json(URI, json!({ "itemList": "eggs" })).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({
            "error": "API key not configured",
            "message": "ANTHROPIC_API_KEY environment variable is missing"
        })
    );
}

#[tokio::test]
async fn malformed_api_key_is_a_config_error() {
    let app = TestApp::with_api_key(Some("sk-live-123")).await;

    let response = app.post_json(URI, json!({ "itemList": "eggs" })).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["error"], "Invalid API key format");
    assert_eq!(response.json()["message"], "API key should start with sk-ant");
    assert!(app.completion_requests().await.is_empty());
}

#[tokio::test]
async fn upstream_error_propagates_status_and_message() {
    let app = TestApp::spawn().await;
    let upstream_body = json!({
        "type": "error",
        "error": { "type": "overloaded_error", "message": "Overloaded" }
    });

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_json(upstream_body.clone()))
        .mount(&app.completion)
        .await;

    let response = app.post_json(URI, json!({ "itemList": "eggs" })).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    let body = response.json();
    assert_eq!(body["error"], "Overloaded");
    assert_eq!(body["details"], upstream_body.to_string());
}

#[tokio::test]
async fn unparseable_upstream_error_uses_default_message_and_truncates() {
    let app = TestApp::spawn().await;
    let html = format!("<html>{}</html>", "x".repeat(1000));

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(502).set_body_string(html.clone()))
        .mount(&app.completion)
        .await;

    let response = app.post_json(URI, json!({ "itemList": "eggs" })).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    let body = response.json();
    assert_eq!(body["error"], "Failed to generate recipes");
    let details = body["details"].as_str().unwrap();
    assert_eq!(details.chars().count(), 500);
    assert!(html.starts_with(details));
}

#[tokio::test]
async fn upstream_not_found_is_reported_with_its_status() {
    let app = TestApp::spawn().await;

    // Nothing mounted: the mock answers 404.
    let response = app.post_json(URI, json!({ "itemList": "eggs" })).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Failed to generate recipes");
}

#[tokio::test]
async fn non_json_success_body_is_an_internal_error() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&app.completion)
        .await;

    let response = app.post_json(URI, json!({ "itemList": "eggs" })).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(body["error"], "Internal server error");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn identical_requests_yield_identical_shapes() {
    let app = TestApp::spawn().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_envelope(&["a"])))
        .expect(2)
        .mount(&app.completion)
        .await;

    let first = app.post_json(URI, json!({ "itemList": "eggs" })).await;
    let second = app.post_json(URI, json!({ "itemList": "eggs" })).await;

    assert_eq!(first.status, second.status);
    assert_eq!(first.json(), second.json());
}
