//! Image generation against the Hugging Face Inference API.
//!
//! Capabilities live in submodules: [`image`] drives the hosted
//! text-to-image endpoint, [`probe`] checks hub-side model availability for
//! diagnostics.

pub mod image;
pub mod probe;

pub use probe::ModelCheck;

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;

use crate::config::HuggingFaceConfig;
use crate::error::AiError;

/// Models attempted after the configured one, in order.
pub const FALLBACK_MODELS: [&str; 3] = [
    "runwayml/stable-diffusion-v1-5",
    "stabilityai/stable-diffusion-2-1",
    "stabilityai/sd-turbo",
];

/// Wait before the single retry when a model reports it is still loading.
pub const LOADING_BACKOFF: Duration = Duration::from_millis(1500);

/// Sleep abstraction so the loading backoff stays observable in tests.
#[async_trait::async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// [`Delay`] backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait::async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Client for hosted inference and hub metadata.
#[derive(Clone)]
pub struct HuggingFaceClient {
    config: HuggingFaceConfig,
    http_client: reqwest::Client,
    delay: Arc<dyn Delay>,
}

impl HuggingFaceClient {
    /// Creates a client from resolved configuration and a shared HTTP client.
    pub fn new(config: HuggingFaceConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
            delay: Arc::new(TokioDelay),
        }
    }

    /// Replaces the backoff clock.
    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    /// Candidate models in attempt order: the configured model first, then
    /// the built-in fallbacks when enabled. The first occurrence of a model
    /// wins; later duplicates are dropped.
    pub fn candidate_models(&self) -> Vec<String> {
        let mut candidates = vec![self.config.model.clone()];
        if self.config.allow_fallback {
            for fallback in FALLBACK_MODELS {
                if !candidates.iter().any(|existing| existing == fallback) {
                    candidates.push(fallback.to_string());
                }
            }
        }
        candidates
    }

    fn api_key(&self) -> Result<&str, AiError> {
        self.config
            .api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .ok_or_else(|| {
                AiError::ConfigurationError(
                    "HF_API_KEY is not configured on the server".to_string(),
                )
            })
    }
}
