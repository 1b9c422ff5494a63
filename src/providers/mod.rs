//! Upstream provider clients.

pub mod gemini;
pub mod huggingface;

pub use gemini::GeminiClient;
pub use huggingface::HuggingFaceClient;
