//! Model filter pipeline.
//!
//! A pure function over an already fetched model list: no I/O, no shared
//! state, and no failure modes. Malformed query values disable their stage,
//! and records missing a field that an active stage needs are excluded.
//!
//! # Stages
//!
//! | Order | Query key      | Effect                                              |
//! |-------|----------------|-----------------------------------------------------|
//! | 1     | `ignore_free`  | drop ids containing `:free` (value must be `true`)  |
//! | 2     | `provider`     | keep providers in the comma list                    |
//! | 3     | `model`        | keep model names (variant ignored) in the comma list|
//! | 4     | `min_context`  | keep `context_length >= n` for positive `n`         |
//! | 5     | `modality`     | keep modalities containing the substring            |
//! | 6     | `strip_suffix` | cut ids at the first `:` (value must be `true`)     |
//!
//! # Example
//!
//! ```
//! use llm_models::filter::{self, FilterParams};
//! use llm_models::models::ModelRecord;
//!
//! let models = vec![
//!     ModelRecord::new("openai/gpt-4:free").with_context_length(8000),
//!     ModelRecord::new("anthropic/claude-3").with_context_length(200000),
//! ];
//!
//! let params = FilterParams::from_query_pairs([("min_context", "10000")]);
//! let kept = filter::apply(&models, &params);
//! assert_eq!(kept.len(), 1);
//! assert_eq!(kept[0].id, "anthropic/claude-3");
//! ```

mod params;
mod pipeline;

pub use params::{keys, FilterParams};
pub use pipeline::{apply, keep};
