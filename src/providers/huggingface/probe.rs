//! Hub-side availability probes used by the health endpoint.

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::HuggingFaceClient;

/// Availability verdict for one candidate model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCheck {
    pub model: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HuggingFaceClient {
    /// Probes hub metadata for every candidate model.
    ///
    /// Returns no checks when no API key is configured. Probe transport
    /// failures are folded into the result as `error` entries rather than
    /// failing the whole report.
    pub async fn probe_models(&self) -> Vec<ModelCheck> {
        let Some(api_key) = self.config.api_key.as_ref() else {
            return Vec::new();
        };
        let api_key = api_key.expose_secret();

        let mut checks = Vec::new();
        for model in self.candidate_models() {
            checks.push(self.probe_model(api_key, &model).await);
        }
        checks
    }

    async fn probe_model(&self, api_key: &str, model: &str) -> ModelCheck {
        let url = format!("{}/api/models/{}", self.config.hub_base_url, model);
        match self.http_client.get(&url).bearer_auth(api_key).send().await {
            Ok(response) => ModelCheck {
                model: model.to_owned(),
                status: probe_status(response.status().as_u16()),
                message: None,
            },
            Err(error) => {
                tracing::warn!(model, error = %error, "model probe failed");
                ModelCheck {
                    model: model.to_owned(),
                    status: "error".to_string(),
                    message: Some(error.to_string()),
                }
            }
        }
    }
}

/// Status label for a hub probe response.
fn probe_status(status: u16) -> String {
    match status {
        200 => "ok".to_string(),
        401 => "unauthorized".to_string(),
        403 => "restricted".to_string(),
        404 => "not-found".to_string(),
        other => format!("http-{other}"),
    }
}
