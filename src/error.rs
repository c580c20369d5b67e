//! Error types and their HTTP mapping.
//!
//! Only two messages ever reach a client: an upstream failure is reported
//! with the upstream's own status code, and everything else collapses into
//! a generic `500 Internal server error`. The detailed cause stays in the
//! server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Message returned when the upstream answers with a non-success status.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Failed to fetch models from OpenRouter API";

/// Message returned for every other failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// LLM Models API errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {status}")]
    Upstream {
        /// Status code reported by the upstream.
        status: u16,
    },

    /// Network communication with the upstream failed.
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream payload did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Server-side error.
    #[error("Server error: {0}")]
    Server(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for LLM Models API operations
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// HTTP status this error is reported with.
    ///
    /// Upstream statuses are mirrored; a status outside the valid HTTP
    /// range becomes `502 Bad Gateway`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upstream { status } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message for this error.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::Upstream { .. } => UPSTREAM_ERROR_MESSAGE,
            _ => INTERNAL_ERROR_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Upstream { status } => {
                tracing::warn!("Upstream request failed with status {}", status);
            },
            other => tracing::error!("Error processing request: {}", other),
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ApiError {
    fn from(err: toml::de::Error) -> Self {
        ApiError::Config(err.to_string())
    }
}
