//! REST API handlers.
//!
//! Bodies are read as loose JSON and validated field by field, so a missing
//! or mistyped field answers with the endpoint's own error text rather than
//! a generic deserialization failure.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AiError;
use crate::providers::huggingface::ModelCheck;
use crate::types::GenerationResult;

use super::AppState;

/// Service banner.
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    /// Status of the server
    pub status: String,
    /// Service name
    pub service: String,
    /// Server version
    pub version: String,
}

/// GET / - service banner
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        status: "ok".to_string(),
        service: "MindSpace".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Reply payload for the chat endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Model reply text
    pub reply: String,
}

/// POST /api/ai/chat - text generation
pub async fn chat(State(state): State<Arc<AppState>>, Json(payload): Json<Value>) -> Response {
    let Some(message) = text_field(&payload, "message") else {
        return error_json(StatusCode::BAD_REQUEST, "Invalid or missing 'message'");
    };
    match state.orchestrator.chat(message).await {
        Ok(reply) => Json(ChatResponse { reply }).into_response(),
        Err(error) => ai_error_response(&error),
    }
}

/// Art payload: a data URL, real or degraded.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArtResponse {
    /// Image as a data URL
    pub art: String,
}

/// POST /api/ai/art - image generation
pub async fn art(State(state): State<Arc<AppState>>, Json(payload): Json<Value>) -> Response {
    let Some(prompt) = text_field(&payload, "prompt") else {
        return error_json(StatusCode::BAD_REQUEST, "Invalid or missing 'prompt'");
    };
    match state.orchestrator.generate_art(prompt).await {
        GenerationResult::Ok(art) | GenerationResult::Degraded(art) => {
            Json(ArtResponse { art }).into_response()
        }
        GenerationResult::Err(error) => ai_error_response(&error),
    }
}

/// Gemini section of the health report.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiHealth {
    /// Whether an API key is configured
    pub api_key_present: bool,
    /// Model attempted first
    pub model: String,
}

/// Hugging Face section of the health report.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HuggingFaceHealth {
    /// Whether an API key is configured
    pub api_key_present: bool,
    /// Model attempted first
    pub model: String,
    /// Whether the built-in fallback models are attempted
    pub allow_fallback: bool,
    /// Hub availability per candidate model, empty without an API key
    pub checks: Vec<ModelCheck>,
}

/// Health and diagnostics report.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether mock mode is active
    pub mock: bool,
    pub gemini: GeminiHealth,
    pub huggingface: HuggingFaceHealth,
}

/// GET /api/ai/health - configuration and model availability diagnostics
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let checks = state.orchestrator.probe_image_models().await;
    let config = state.orchestrator.config();
    Json(HealthResponse {
        mock: config.mock,
        gemini: GeminiHealth {
            api_key_present: config.gemini.api_key_present(),
            model: config.gemini.model.clone(),
        },
        huggingface: HuggingFaceHealth {
            api_key_present: config.huggingface.api_key_present(),
            model: config.huggingface.model.clone(),
            allow_fallback: config.huggingface.allow_fallback,
            checks,
        },
    })
}

/// Mind map envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct MindMapResponse {
    pub success: bool,
    /// Node/edge graph as produced by the model
    pub mindmap: Value,
    /// Topic the map was built for
    pub topic: String,
}

/// POST /api/media/mindmap - mind map synthesis
///
/// The topic is read from `topic`, falling back to `prompt`.
pub async fn mindmap(State(state): State<Arc<AppState>>, Json(payload): Json<Value>) -> Response {
    let Some(topic) = text_field(&payload, "topic").or_else(|| text_field(&payload, "prompt"))
    else {
        return error_json(
            StatusCode::BAD_REQUEST,
            "Invalid or missing 'topic' or 'prompt'",
        );
    };
    match state.orchestrator.generate_mindmap(topic).await {
        Ok(mindmap) => Json(MindMapResponse {
            success: true,
            mindmap,
            topic: topic.to_string(),
        })
        .into_response(),
        Err(error) => ai_error_response(&error),
    }
}

/// Error body shared by every failure path.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure description
    pub error: String,
}

/// Reads a non-blank string field out of the request body.
fn text_field<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
}

fn ai_error_response(error: &AiError) -> Response {
    let status =
        StatusCode::from_u16(error.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    tracing::error!(status = status.as_u16(), error = %error, "request failed");
    error_json(status, &error.to_string())
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
