//! Provider configuration snapshots.
//!
//! Configuration is resolved from the environment exactly once (at startup)
//! into immutable value structs; request handling never touches the process
//! environment. Resolution reads through an injectable variable source, so
//! the rules stay testable without mutating process globals. A missing API
//! key is represented as `None` rather than an error so each caller can
//! decide how to react (reject vs. mock).

use std::time::Duration;

use secrecy::SecretString;

/// Default text model when `GEMINI_MODEL` is unset.
pub const GEMINI_DEFAULT_MODEL: &str = "gemini-2.5-pro";
/// Default image model when `HF_MODEL` is unset.
pub const HF_DEFAULT_MODEL: &str = "stabilityai/stable-diffusion-2";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const HF_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co";
const HF_HUB_BASE_URL: &str = "https://huggingface.co";

/// Text-generation provider (Google Gemini) configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` when not configured.
    pub api_key: Option<SecretString>,
    /// Model attempted first on every API version.
    pub model: String,
    /// Base URL without an API-version segment (versions vary per attempt).
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GEMINI_DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Create a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL (tests point this at a local mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether an API key is configured.
    pub fn api_key_present(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Image-generation provider (Hugging Face Inference API) configuration.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// API key; `None` when not configured.
    pub api_key: Option<SecretString>,
    /// Model attempted first.
    pub model: String,
    /// Whether the fixed fallback model list is appended after `model`.
    pub allow_fallback: bool,
    /// Whether total failure synthesizes a placeholder instead of an error.
    pub placeholder_on_fail: bool,
    /// Inference API base URL.
    pub inference_base_url: String,
    /// Hub API base URL (model metadata probes for health checks).
    pub hub_base_url: String,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: HF_DEFAULT_MODEL.to_string(),
            allow_fallback: true,
            placeholder_on_fail: false,
            inference_base_url: HF_INFERENCE_BASE_URL.to_string(),
            hub_base_url: HF_HUB_BASE_URL.to_string(),
        }
    }
}

impl HuggingFaceConfig {
    /// Create a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::from(api_key.into())),
            ..Default::default()
        }
    }

    /// Set the model attempted first.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Enable or disable the fallback model list.
    pub const fn with_allow_fallback(mut self, allow: bool) -> Self {
        self.allow_fallback = allow;
        self
    }

    /// Enable or disable placeholder synthesis on total failure.
    pub const fn with_placeholder_on_fail(mut self, enabled: bool) -> Self {
        self.placeholder_on_fail = enabled;
        self
    }

    /// Set the Inference API base URL.
    pub fn with_inference_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.inference_base_url = base_url.into();
        self
    }

    /// Set the Hub API base URL.
    pub fn with_hub_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.hub_base_url = base_url.into();
        self
    }

    /// Whether an API key is configured.
    pub fn api_key_present(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Complete orchestration-layer configuration.
#[derive(Debug, Clone, Default)]
pub struct AiConfig {
    /// Global mock mode: bypass all provider calls with deterministic output.
    pub mock: bool,
    /// Optional overall deadline applied to a request's whole attempt chain.
    pub request_timeout: Option<Duration>,
    /// Text provider settings.
    pub gemini: GeminiConfig,
    /// Image provider settings.
    pub huggingface: HuggingFaceConfig,
}

impl AiConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`AiConfig::from_env`] with an injectable variable source, so
    /// the resolution rules are testable without touching process globals.
    ///
    /// Flag semantics follow the original deployment contract: `MOCK_AI` and
    /// `HF_PLACEHOLDER_ON_FAIL` are on only when exactly `"true"`, while
    /// `HF_ALLOW_FALLBACK` is on unless exactly `"false"`.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Self {
        let gemini = GeminiConfig {
            api_key: nonempty(&vars, "GEMINI_API_KEY").map(SecretString::from),
            model: nonempty(&vars, "GEMINI_MODEL")
                .unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
            ..Default::default()
        };

        let huggingface = HuggingFaceConfig {
            api_key: nonempty(&vars, "HF_API_KEY").map(SecretString::from),
            model: nonempty(&vars, "HF_MODEL")
                .map(|m| m.trim().to_string())
                .unwrap_or_else(|| HF_DEFAULT_MODEL.to_string()),
            allow_fallback: vars("HF_ALLOW_FALLBACK").as_deref() != Some("false"),
            placeholder_on_fail: vars("HF_PLACEHOLDER_ON_FAIL").as_deref() == Some("true"),
            ..Default::default()
        };

        Self {
            mock: vars("MOCK_AI").as_deref() == Some("true"),
            request_timeout: nonempty(&vars, "AI_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs),
            gemini,
            huggingface,
        }
    }

    /// Enable or disable mock mode.
    pub const fn with_mock(mut self, mock: bool) -> Self {
        self.mock = mock;
        self
    }

    /// Set the overall per-request deadline.
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// HTTP server binding configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// Resolve from the environment (`PORT`, default 5000).
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Like [`ServerConfig::from_env`] with an injectable variable source.
    pub fn from_vars(vars: impl Fn(&str) -> Option<String>) -> Self {
        let port = nonempty(&vars, "PORT")
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);
        Self {
            port,
            ..Default::default()
        }
    }

    /// Socket address string, e.g. `0.0.0.0:5000`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read a variable from the source, treating unset and empty as missing.
fn nonempty(vars: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    vars(name).filter(|value| !value.is_empty())
}
