//! HTTP façade: shared state plus the router and its middleware.

mod api;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::orchestrator::Orchestrator;

pub use api::{
    ArtResponse, ChatResponse, ErrorResponse, GeminiHealth, HealthResponse, HuggingFaceHealth,
    MindMapResponse, RootResponse,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Provider orchestration behind all AI endpoints.
    pub orchestrator: Orchestrator,
}

impl AppState {
    /// Wraps an orchestrator for router consumption.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}

/// Builds the application router with all routes and middleware configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/api/ai/chat", post(api::chat))
        .route("/api/ai/art", post(api::art))
        .route("/api/ai/health", get(api::health))
        .route("/api/media/mindmap", post(api::mindmap))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
