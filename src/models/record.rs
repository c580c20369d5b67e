//! Model record data structures.
//!
//! A record keeps the upstream object exactly as received. Only `id` is
//! required; the fields the filter pipeline reads (`context_length`,
//! `architecture.modality`) are looked up on demand, so a record with an
//! unexpected shape still passes through unfiltered requests byte for byte.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::ModelId;

/// One model descriptor as served by the upstream catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Identifier, conventionally `<provider>/<model-name>[:<variant>]`
    pub id: String,

    /// Every other upstream field, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelRecord {
    /// Create a record with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Map::new(),
        }
    }

    /// Set the context length
    pub fn with_context_length(self, context_length: u64) -> Self {
        self.with_field("context_length", Value::from(context_length))
    }

    /// Set the architecture modality, creating the architecture block if
    /// it is missing or not an object
    pub fn with_modality(mut self, modality: impl Into<String>) -> Self {
        let architecture = self
            .extra
            .entry("architecture")
            .or_insert_with(|| Value::Object(Map::new()));
        if !architecture.is_object() {
            *architecture = Value::Object(Map::new());
        }
        if let Value::Object(block) = architecture {
            block.insert("modality".to_string(), Value::String(modality.into()));
        }
        self
    }

    /// Set an uninterpreted field
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Parsed view of the id
    pub fn model_id(&self) -> ModelId<'_> {
        ModelId::parse(&self.id)
    }

    /// Context window in tokens.
    ///
    /// Non-negative numbers are accepted, fractional ones rounded down.
    /// `None` for a missing field, `null`, strings and other shapes.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn context_length(&self) -> Option<u64> {
        let value = self.extra.get("context_length")?;
        value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|len| len.is_finite() && *len >= 0.0)
                .map(|len| len as u64)
        })
    }

    /// Modality label, if `architecture.modality` is a string
    pub fn modality(&self) -> Option<&str> {
        self.extra
            .get("architecture")?
            .get("modality")?
            .as_str()
    }

    /// Decode a single raw upstream value.
    ///
    /// Returns `None` for values that are not objects or lack a string `id`.
    pub fn from_value(value: Value) -> Option<Self> {
        serde_json::from_value(value).ok()
    }
}

/// Response envelope shared by the upstream and the `/models` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList<T = ModelRecord> {
    /// Model records
    pub data: Vec<T>,
}

impl<T> ModelList<T> {
    /// Wrap a list of records
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
