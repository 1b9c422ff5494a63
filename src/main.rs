use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use mindspace::config::{AiConfig, ServerConfig};
use mindspace::orchestrator::Orchestrator;
use mindspace::server::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let ai_config = AiConfig::from_env();
    let server_config = ServerConfig::from_env();
    if ai_config.mock {
        tracing::info!("mock mode enabled, no provider calls will be made");
    }

    let state = Arc::new(AppState::new(Orchestrator::new(ai_config)));
    let router = create_router(state);

    let addr = server_config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("mindspace server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .context("server terminated")?;
    Ok(())
}
