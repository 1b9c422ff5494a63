//! Text generation against the Google Generative Language API.
//!
//! The configured model is tried on `v1beta` and then `v1`; failures that
//! look like a missing or unsupported model advance the ladder, anything
//! else aborts. A hard-coded fallback model gets one last attempt after the
//! ladder is exhausted.

pub mod types;

use std::sync::LazyLock;

use regex::Regex;
use secrecy::ExposeSecret;

use crate::config::GeminiConfig;
use crate::error::AiError;
use crate::normalize;
use crate::types::{AttemptOutcome, Prompt};

use types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Model tried as a last resort once every configured attempt has failed.
pub const FALLBACK_MODEL: &str = "gemini-pro";

/// Provider messages that mean "this model/version pairing does not exist"
/// rather than "the request itself is bad".
static MODEL_NOT_FOUND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)not found|not supported").unwrap());

/// Generative Language API surface to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    V1Beta,
    V1,
}

impl ApiVersion {
    /// Path segment for this version.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1Beta => "v1beta",
            Self::V1 => "v1",
        }
    }
}

/// Client for the `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    /// Creates a client from resolved configuration and a shared HTTP client.
    pub fn new(config: GeminiConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Produces a reply for `prompt`.
    ///
    /// Walks the version ladder with the configured model, then gives
    /// [`FALLBACK_MODEL`] one final shot on `v1beta`. Fatal attempt failures
    /// surface as `Gemini API error: ...`; a failed fallback surfaces as
    /// `Gemini API error (fallback failed): ...`.
    pub async fn chat(&self, prompt: &Prompt) -> Result<String, AiError> {
        let api_key = self.api_key()?;

        let attempts = [
            (ApiVersion::V1Beta, self.config.model.as_str()),
            (ApiVersion::V1, self.config.model.as_str()),
        ];
        for (version, model) in attempts {
            match self.attempt(api_key, version, model, prompt).await {
                AttemptOutcome::Success(reply) => return Ok(reply),
                AttemptOutcome::Retry { reason } => {
                    tracing::warn!(
                        version = version.as_str(),
                        model,
                        reason = %reason,
                        "model unavailable, advancing to next attempt"
                    );
                }
                AttemptOutcome::Fatal(error) => return Err(error),
            }
        }

        tracing::warn!(
            model = FALLBACK_MODEL,
            "configured attempts exhausted, trying fallback model"
        );
        self.try_generate(api_key, ApiVersion::V1Beta, FALLBACK_MODEL, prompt)
            .await
            .map_err(|detail| {
                AiError::ProviderError(format!("Gemini API error (fallback failed): {detail}"))
            })
    }

    /// Single-shot generation with the configured model on `v1beta`, no
    /// ladder and no fallback.
    pub async fn generate_once(&self, prompt: &Prompt) -> Result<String, AiError> {
        let api_key = self.api_key()?;
        self.try_generate(
            api_key,
            ApiVersion::V1Beta,
            self.config.model.as_str(),
            prompt,
        )
        .await
        .map_err(AiError::ProviderError)
    }

    async fn attempt(
        &self,
        api_key: &str,
        version: ApiVersion,
        model: &str,
        prompt: &Prompt,
    ) -> AttemptOutcome<String> {
        match self.try_generate(api_key, version, model, prompt).await {
            Ok(reply) => AttemptOutcome::Success(reply),
            Err(message) => classify_failure(message),
        }
    }

    /// One POST to `{base}/{version}/models/{model}:generateContent`.
    ///
    /// Errors carry the raw provider message; callers decide how to wrap it.
    async fn try_generate(
        &self,
        api_key: &str,
        version: ApiVersion,
        model: &str,
        prompt: &Prompt,
    ) -> Result<String, String> {
        let url = format!(
            "{}/{}/models/{}:generateContent",
            self.config.base_url,
            version.as_str(),
            model
        );
        tracing::debug!(version = version.as_str(), model, "requesting completion");

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::from_text(prompt.as_str()))
            .send()
            .await
            .map_err(|error| error.to_string())?;

        if !response.status().is_success() {
            return Err(provider_message(response).await);
        }

        let payload: GenerateContentResponse =
            response.json().await.map_err(|error| error.to_string())?;
        Ok(normalize::extract_text(&payload))
    }

    fn api_key(&self) -> Result<&str, AiError> {
        self.config
            .api_key
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .ok_or_else(|| {
                AiError::ConfigurationError(
                    "GEMINI_API_KEY is not configured on the server".to_string(),
                )
            })
    }
}

/// Sorts a failed attempt into "advance the ladder" or "give up now".
fn classify_failure(message: String) -> AttemptOutcome<String> {
    if MODEL_NOT_FOUND.is_match(&message) {
        AttemptOutcome::Retry { reason: message }
    } else {
        AttemptOutcome::Fatal(AiError::ProviderError(format!(
            "Gemini API error: {message}"
        )))
    }
}

/// Best-effort message for a non-2xx response: the provider's own error
/// message when the body carries one, `HTTP {status}` otherwise.
async fn provider_message(response: reqwest::Response) -> String {
    let status = response.status().as_u16();
    match response.json::<ErrorResponse>().await {
        Ok(body) if !body.error.message.is_empty() => body.error.message,
        _ => format!("HTTP {status}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_strings_match_route_segments() {
        assert_eq!(ApiVersion::V1Beta.as_str(), "v1beta");
        assert_eq!(ApiVersion::V1.as_str(), "v1");
    }

    #[test]
    fn missing_model_advances_the_ladder() {
        let message = "models/gemini-x is NOT FOUND for API version v1beta".to_string();
        assert_eq!(
            classify_failure(message.clone()),
            AttemptOutcome::Retry { reason: message }
        );
    }

    #[test]
    fn unsupported_model_advances_the_ladder() {
        let message = "this model is Not Supported for generateContent".to_string();
        assert_eq!(
            classify_failure(message.clone()),
            AttemptOutcome::Retry { reason: message }
        );
    }

    #[test]
    fn other_failures_abort_with_wrapped_error() {
        assert_eq!(
            classify_failure("quota exceeded".to_string()),
            AttemptOutcome::Fatal(AiError::ProviderError(
                "Gemini API error: quota exceeded".to_string()
            ))
        );
    }
}
