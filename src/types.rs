//! Request-scoped value types shared across the orchestration layer.
//!
//! Everything here is owned by a single request: constructed when the request
//! enters the façade and dropped with the response. Nothing is shared between
//! concurrent requests.

use crate::error::AiError;

/// A validated, non-empty prompt.
///
/// Construction is the only place the invariant is checked; provider clients
/// take `&Prompt`, so a blank request can never reach a network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Validate `text`, rejecting strings that are empty after trimming.
    ///
    /// The accepted text is kept untrimmed: surrounding whitespace is passed
    /// through to providers and echoed verbatim by mock mode.
    pub fn new(text: impl Into<String>) -> Result<Self, AiError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AiError::InvalidInput(
                "prompt must be a non-empty string".to_string(),
            ));
        }
        Ok(Self(text))
    }

    /// The prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The outcome of one candidate attempt.
///
/// `Retry` advances the loop to the next candidate; `Fatal` aborts the whole
/// chain. Classification happens where provider responses are decoded, so the
/// attempt loops themselves stay free of status- and message-matching rules.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome<T> {
    /// The candidate produced a usable payload.
    Success(T),
    /// The candidate failed in a way that permits trying the next one.
    Retry {
        /// Human-readable failure description, recorded for exhaustion reports.
        reason: String,
    },
    /// The candidate failed in a way that must abort all remaining attempts.
    Fatal(AiError),
}

/// Terminal result of one generation request.
///
/// Constructed once per request, handed to the caller, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    /// Real provider output: reply text or an image data URL.
    Ok(String),
    /// A synthesized placeholder substituted after total provider failure.
    Degraded(String),
    /// Terminal failure with no placeholder permitted.
    Err(AiError),
}

impl GenerationResult {
    /// Displayable content, present for `Ok` and `Degraded` results.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Ok(content) | Self::Degraded(content) => Some(content),
            Self::Err(_) => None,
        }
    }
}
