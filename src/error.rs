//! Error types for the AI orchestration layer.
//!
//! The retryable-vs-fatal distinction that drives candidate fallback lives in
//! [`crate::types::AttemptOutcome`], not here: by the time an `AiError`
//! leaves a client, every permitted fallback has already been consumed.

use thiserror::Error;

/// Errors surfaced by the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// A required key or setting is missing on the server.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request input rejected before any provider call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Provider rejected our credentials (HTTP 401); aborts all fallbacks.
    #[error("{0}")]
    UnauthorizedError(String),

    /// Fatal provider failure (quota, safety block, malformed request, ...).
    #[error("{0}")]
    ProviderError(String),

    /// Every candidate model was tried; payload lists per-model reasons.
    #[error("{0}")]
    AllCandidatesFailed(String),

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Failed to decode a provider payload.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The per-request deadline elapsed before any candidate succeeded.
    #[error("Request timed out: {0}")]
    TimeoutError(String),
}

impl AiError {
    /// HTTP status the façade answers with for this error.
    ///
    /// Only rejected input maps to a client error; every provider-side or
    /// configuration failure is a server-side 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for AiError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
