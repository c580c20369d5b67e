//! Model records and identifiers.
//!
//! # Example
//!
//! ```
//! use llm_models::models::ModelRecord;
//!
//! let record = ModelRecord::new("openai/gpt-4:preview").with_context_length(8000);
//!
//! let id = record.model_id();
//! assert_eq!(id.provider(), Some("openai"));
//! assert_eq!(id.name(), Some("gpt-4"));
//! assert_eq!(id.variant(), Some("preview"));
//! ```

mod id;
mod record;

pub use id::ModelId;
pub use record::{ModelList, ModelRecord};
