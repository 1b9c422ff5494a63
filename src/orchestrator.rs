//! Request orchestration across providers.
//!
//! The HTTP layer hands raw input to an [`Orchestrator`], which owns the
//! provider clients and applies the cross-cutting policies such as mock
//! mode and the shared request deadline.

use std::future::Future;

use serde_json::Value;

use crate::config::AiConfig;
use crate::degrade;
use crate::error::AiError;
use crate::mindmap;
use crate::mock;
use crate::providers::gemini::GeminiClient;
use crate::providers::huggingface::{HuggingFaceClient, ModelCheck};
use crate::types::{GenerationResult, Prompt};

/// Entry point for every AI operation the service offers.
#[derive(Clone)]
pub struct Orchestrator {
    config: AiConfig,
    gemini: GeminiClient,
    huggingface: HuggingFaceClient,
}

impl Orchestrator {
    /// Builds the orchestrator and its provider clients from configuration.
    pub fn new(config: AiConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Like [`Orchestrator::new`] with a caller-supplied HTTP client.
    pub fn with_http_client(config: AiConfig, http_client: reqwest::Client) -> Self {
        let gemini = GeminiClient::new(config.gemini.clone(), http_client.clone());
        let huggingface = HuggingFaceClient::new(config.huggingface.clone(), http_client);
        Self {
            config,
            gemini,
            huggingface,
        }
    }

    /// Resolved configuration backing this orchestrator.
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Replies to a chat message.
    pub async fn chat(&self, message: &str) -> Result<String, AiError> {
        let prompt = Prompt::new(message)?;
        if self.config.mock {
            tracing::debug!("mock mode, echoing chat message");
            return Ok(mock::chat_reply(prompt.as_str()));
        }
        self.bounded(self.gemini.chat(&prompt)).await
    }

    /// Generates art for a prompt.
    ///
    /// Provider failures are routed through the degradation policy, so the
    /// outcome distinguishes real output from a substituted placeholder.
    /// Rejected input never degrades.
    pub async fn generate_art(&self, prompt_text: &str) -> GenerationResult {
        let prompt = match Prompt::new(prompt_text) {
            Ok(prompt) => prompt,
            Err(error) => return GenerationResult::Err(error),
        };
        if self.config.mock {
            tracing::debug!("mock mode, synthesizing art");
            return GenerationResult::Ok(mock::art_data_url(prompt.as_str()));
        }
        match self.bounded(self.huggingface.generate(&prompt)).await {
            Ok(data_url) => GenerationResult::Ok(data_url),
            Err(error) => degrade::on_image_failure(
                &prompt,
                error,
                self.config.huggingface.placeholder_on_fail,
            ),
        }
    }

    /// Builds a mind map for a topic.
    pub async fn generate_mindmap(&self, topic: &str) -> Result<Value, AiError> {
        if self.config.mock {
            tracing::debug!("mock mode, synthesizing mind map");
            return Ok(mock::mindmap(topic));
        }
        self.bounded(mindmap::generate(&self.gemini, topic)).await
    }

    /// Hub availability checks for every candidate image model.
    pub async fn probe_image_models(&self) -> Vec<ModelCheck> {
        self.huggingface.probe_models().await
    }

    /// Applies the configured request deadline to a provider call.
    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, AiError>>,
    ) -> Result<T, AiError> {
        match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, operation)
                .await
                .map_err(|_| {
                    AiError::TimeoutError(format!("no reply within {}s", limit.as_secs()))
                })?,
            None => operation.await,
        }
    }
}
