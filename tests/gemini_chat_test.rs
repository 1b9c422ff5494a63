//! Mock API tests for the Gemini chat path.
//!
//! These tests use wiremock to simulate Generative Language API responses
//! and pin the version/model fallback ladder: configured model on `v1beta`,
//! then `v1`, then the hard-coded `gemini-pro` fallback.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mindspace::config::GeminiConfig;
use mindspace::error::AiError;
use mindspace::providers::gemini::GeminiClient;
use mindspace::types::Prompt;

fn completion_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": text}]
            },
            "finishReason": "STOP"
        }]
    })
}

fn error_response(message: &str) -> serde_json::Value {
    json!({
        "error": {
            "code": 404,
            "message": message,
            "status": "NOT_FOUND"
        }
    })
}

fn client_for(server: &MockServer) -> GeminiClient {
    let config = GeminiConfig::new("test-key")
        .with_model("gemini-2.5-pro")
        .with_base_url(server.uri());
    GeminiClient::new(config, reqwest::Client::new())
}

#[tokio::test]
async fn first_attempt_success_returns_the_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_json(json!({
            "contents": [{"parts": [{"text": "Hello"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("Hi there")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.chat(&Prompt::new("Hello").unwrap()).await.unwrap();
    assert_eq!(reply, "Hi there");
}

#[tokio::test]
async fn missing_model_on_v1beta_advances_to_v1() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_response(
            "models/gemini-2.5-pro is not found for API version v1beta",
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("From v1")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.chat(&Prompt::new("Hello").unwrap()).await.unwrap();
    assert_eq!(reply, "From v1");
}

#[tokio::test]
async fn quota_errors_abort_without_further_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "message": "Quota exceeded for requests", "status": "RESOURCE_EXHAUSTED"}
        })))
        .mount(&server)
        .await;
    // The v1 attempt and the fallback must never fire for a fatal failure.
    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("nope")))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .chat(&Prompt::new("Hello").unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        error,
        AiError::ProviderError("Gemini API error: Quota exceeded for requests".to_string())
    );
}

#[tokio::test]
async fn exhausted_ladder_falls_back_to_gemini_pro() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_response(
            "models/gemini-2.5-pro is not found for API version v1beta",
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_response(
            "models/gemini-2.5-pro is not found for API version v1",
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("Old faithful")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.chat(&Prompt::new("Hello").unwrap()).await.unwrap();
    assert_eq!(reply, "Old faithful");
}

#[tokio::test]
async fn failed_fallback_reports_the_fallback_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_response(
            "models/gemini-2.5-pro is not found for API version v1beta",
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_response(
            "models/gemini-2.5-pro is not found for API version v1",
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_response(
            "models/gemini-pro is not found for API version v1beta",
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .chat(&Prompt::new("Hello").unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        error,
        AiError::ProviderError(
            "Gemini API error (fallback failed): models/gemini-pro is not found for API version v1beta"
                .to_string()
        )
    );
}

#[tokio::test]
async fn unreadable_error_bodies_fall_back_to_the_status_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream meltdown"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = client
        .chat(&Prompt::new("Hello").unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        error,
        AiError::ProviderError("Gemini API error: HTTP 500".to_string())
    );
}

#[tokio::test]
async fn missing_api_key_never_touches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response("nope")))
        .expect(0)
        .mount(&server)
        .await;

    let config = GeminiConfig::default().with_base_url(server.uri());
    let client = GeminiClient::new(config, reqwest::Client::new());
    let error = client
        .chat(&Prompt::new("Hello").unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "Configuration error: GEMINI_API_KEY is not configured on the server"
    );
}

#[tokio::test]
async fn empty_candidate_lists_become_the_placeholder_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reply = client.chat(&Prompt::new("Hello").unwrap()).await.unwrap();
    assert_eq!(reply, "No response.");
}
