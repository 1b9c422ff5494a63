//! Text-to-image generation over the hosted inference endpoint.

use serde::Serialize;

use crate::error::AiError;
use crate::normalize;
use crate::types::{AttemptOutcome, Prompt};

use super::{HuggingFaceClient, LOADING_BACKOFF};

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

impl HuggingFaceClient {
    /// Generates one image for `prompt`, walking the candidate list until a
    /// model returns image bytes.
    ///
    /// Per-model failures are collected as `{model}: {reason}` entries; when
    /// no candidate succeeds they surface joined inside
    /// [`AiError::AllCandidatesFailed`]. Authorization failures and transport
    /// errors abort the walk immediately.
    pub async fn generate(&self, prompt: &Prompt) -> Result<String, AiError> {
        let api_key = self.api_key()?;
        let candidates = self.candidate_models();

        let mut reasons = Vec::with_capacity(candidates.len());
        for model in &candidates {
            match self.attempt_generate(api_key, model, prompt).await {
                AttemptOutcome::Success(data_url) => {
                    tracing::debug!(model, "image generated");
                    return Ok(data_url);
                }
                AttemptOutcome::Retry { reason } => {
                    tracing::warn!(model, reason = %reason, "candidate failed, trying next");
                    reasons.push(format!("{model}: {reason}"));
                }
                AttemptOutcome::Fatal(error) => return Err(error),
            }
        }

        Err(AiError::AllCandidatesFailed(format!(
            "Hugging Face inference failed for all candidates. Reasons: {}",
            reasons.join("; ")
        )))
    }

    /// One model attempt: a POST, at most one loading retry, then
    /// classification of whatever came back.
    async fn attempt_generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &Prompt,
    ) -> AttemptOutcome<String> {
        let mut response = match self.post_inference(api_key, model, prompt).await {
            Ok(response) => response,
            Err(error) => return AttemptOutcome::Fatal(error.into()),
        };

        if response.status().as_u16() == 503 {
            tracing::debug!(model, "model loading, retrying once");
            self.delay.sleep(LOADING_BACKOFF).await;
            response = match self.post_inference(api_key, model, prompt).await {
                Ok(response) => response,
                Err(error) => return AttemptOutcome::Fatal(error.into()),
            };
        }

        classify_response(model, response).await
    }

    async fn post_inference(
        &self,
        api_key: &str,
        model: &str,
        prompt: &Prompt,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let url = format!("{}/models/{}", self.config.inference_base_url, model);
        self.http_client
            .post(&url)
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "image/png")
            .json(&InferenceRequest {
                inputs: prompt.as_str(),
            })
            .send()
            .await
    }
}

/// Maps one settled response onto the attempt ladder.
///
/// A 401 is fatal for the whole walk. 403 and 404 are model-specific and
/// advance to the next candidate. A 2xx carrying an image content type is a
/// success; everything else becomes a reason string for the failure report.
async fn classify_response(model: &str, response: reqwest::Response) -> AttemptOutcome<String> {
    let status = response.status().as_u16();
    match status {
        401 => AttemptOutcome::Fatal(AiError::UnauthorizedError(
            "Unauthorized with Hugging Face. Set a valid HF_API_KEY in .env and restart the server."
                .to_string(),
        )),
        403 => AttemptOutcome::Retry {
            reason: format!("Restricted access: accept terms for {model}"),
        },
        404 => AttemptOutcome::Retry {
            reason: format!("Model not found: {model}"),
        },
        _ => {
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_owned();
            if (200..300).contains(&status) && content_type.contains("image") {
                match response.bytes().await {
                    Ok(bytes) => AttemptOutcome::Success(normalize::png_data_url(&bytes)),
                    Err(error) => AttemptOutcome::Fatal(error.into()),
                }
            } else {
                AttemptOutcome::Retry {
                    reason: error_reason(status, response).await,
                }
            }
        }
    }
}

/// Reason text for a response that is neither an image nor a mapped status:
/// the body's `error` or `message` field when it parses as JSON, plain
/// `HTTP {status}` otherwise.
async fn error_reason(status: u16, response: reqwest::Response) -> String {
    let fallback = format!("HTTP {status}");
    let body = response.bytes().await.unwrap_or_default();
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(value) => value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .filter(|text| !text.is_empty())
            .or_else(|| {
                value
                    .get("message")
                    .and_then(serde_json::Value::as_str)
                    .filter(|text| !text.is_empty())
            })
            .map(str::to_owned)
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}
