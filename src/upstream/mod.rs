//! Upstream model catalogue client.
//!
//! Fetches `{ "data": [...] }` from the configured endpoint (OpenRouter by
//! default). Records are decoded one at a time; an entry without a string
//! `id` is dropped instead of failing the whole list, and every other field
//! is kept as sent.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::error::{ApiError, Result};
use crate::models::ModelRecord;

/// Envelope of the upstream response, records still undecoded
#[derive(Debug, Deserialize)]
struct RawModelList {
    data: Vec<Value>,
}

/// HTTP client for the upstream model list
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    url: String,
}

impl UpstreamClient {
    /// Create a client from configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Upstream URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and decode the full model list
    pub async fn fetch_models(&self) -> Result<Vec<ModelRecord>> {
        tracing::debug!("Fetching models from {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::warn!("Upstream request failed: {}", e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Upstream {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let models = decode_model_list(&body)?;

        tracing::debug!("Fetched {} models from upstream", models.len());
        Ok(models)
    }
}

/// Decode an upstream body, dropping entries that have no string `id`.
pub fn decode_model_list(body: &[u8]) -> Result<Vec<ModelRecord>> {
    let raw: RawModelList = serde_json::from_slice(body)
        .map_err(|e| ApiError::Decode(format!("Invalid upstream payload: {e}")))?;

    let total = raw.data.len();
    let models: Vec<ModelRecord> = raw
        .data
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let record = ModelRecord::from_value(value);
            if record.is_none() {
                tracing::warn!("Skipping malformed upstream record at index {}", index);
            }
            record
        })
        .collect();

    if models.len() < total {
        tracing::warn!("Dropped {} of {} upstream records", total - models.len(), total);
    }

    Ok(models)
}
