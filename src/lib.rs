//! # LLM Models API
//!
//! A small HTTP proxy over the OpenRouter model catalogue. It fetches the
//! upstream list, applies optional client-requested filters and one
//! id-shaping transform, and returns the result as JSON.
//!
//! ## Request flow
//!
//! ```text
//! Client                  LLM Models API                   OpenRouter
//!   |                          |                                |
//!   |-- GET /models?... ------>|                                |
//!   |                          |-- cache miss: GET /models ---->|
//!   |                          |<------ { "data": [...] } ------|
//!   |                          |   (cached for 600s)            |
//!   |                          |                                |
//!   |                          |  ignore_free -> provider ->    |
//!   |                          |  model -> min_context ->       |
//!   |                          |  modality -> strip_suffix      |
//!   |<-- { "data": [...] } ----|                                |
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use llm_models::{filter, FilterParams, ModelRecord};
//!
//! let models = vec![
//!     ModelRecord::new("openai/gpt-4:free").with_modality("text->text"),
//!     ModelRecord::new("anthropic/claude-3").with_modality("text+image->text"),
//! ];
//!
//! let params = FilterParams::from_query_pairs([("modality", "image")]);
//! let kept = filter::apply(&models, &params);
//! assert_eq!(kept[0].id, "anthropic/claude-3");
//! ```
//!
//! ## Modules
//!
//! - [`filter`]: The model filter pipeline
//! - [`models`]: Model records and identifier parsing
//! - [`upstream`]: Upstream catalogue client
//! - [`cache`]: TTL cache for the upstream list
//! - [`server`]: HTTP API server (Axum-based)
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod server;
pub mod upstream;

// Re-exports for convenience
pub use cache::ModelCache;
pub use config::Config;
pub use error::{ApiError, Result};
pub use filter::FilterParams;
pub use models::{ModelId, ModelList, ModelRecord};
pub use server::{AppState, Server};
pub use upstream::UpstreamClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
