//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::state::AppState;
use crate::error::Result;
use crate::filter::{self, FilterParams};
use crate::models::ModelList;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors_enabled = state.config.server.cors;

    let router = Router::new()
        // Health
        .route("/", get(health_check))
        .route("/health", get(health_check))
        // Catalogue
        .route("/models", get(list_models))
        .with_state(state);

    if cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
    } else {
        router.layer(TraceLayer::new_for_http())
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: &'static str,
    /// Human-readable service banner
    pub message: &'static str,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        message: "LLM Models API is running",
    })
}

/// Filtered model list
async fn list_models(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let params = FilterParams::from_query_pairs(pairs);
    let models = state.models().await?;

    let filtered = filter::apply(&models, &params);
    tracing::debug!("Returning {} of {} models", filtered.len(), models.len());

    Ok((
        [(header::CACHE_CONTROL, state.cache_control())],
        Json(ModelList::new(filtered)),
    )
        .into_response())
}
