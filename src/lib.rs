//! # MindSpace - AI Orchestration Backend
//!
//! MindSpace fronts two upstream AI providers behind one small HTTP API:
//! text chat through Google's Generative Language API and image generation
//! through the Hugging Face Inference API, plus mind map synthesis built on
//! the text path.
//!
#![deny(unsafe_code)]
//!
//! ## Behavior
//!
//! - **Fallback ladders**: the chat path walks API versions before a
//!   hard-coded fallback model; the art path walks an ordered candidate
//!   model list.
//! - **Degradation**: when every art candidate fails, an SVG placeholder
//!   can be served instead of an error.
//! - **Mock mode**: one switch short-circuits every provider call with
//!   deterministic canned output, for offline development.
//! - **Injectable configuration**: clients read nothing from the process
//!   environment; [`config::AiConfig::from_env`] is the single place the
//!   environment is consulted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mindspace::config::AiConfig;
//! use mindspace::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::new(AiConfig::from_env());
//!     let reply = orchestrator.chat("Say hi in five words").await?;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod degrade;
pub mod error;
pub mod mindmap;
pub mod mock;
pub mod normalize;
pub mod orchestrator;
pub mod providers;
pub mod server;
pub mod types;

pub use config::{AiConfig, ServerConfig};
pub use error::AiError;
pub use orchestrator::Orchestrator;
pub use types::{AttemptOutcome, GenerationResult, Prompt};
