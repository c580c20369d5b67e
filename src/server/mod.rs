//! LLM Models API HTTP server.
//!
//! # Endpoints
//!
//! | Endpoint  | Method | Description                 |
//! |-----------|--------|-----------------------------|
//! | `/`       | GET    | Health check                |
//! | `/health` | GET    | Health check (alias)        |
//! | `/models` | GET    | Filtered upstream model list|
//!
//! # Example
//!
//! ```rust,ignore
//! use llm_models::{server::Server, Config};
//!
//! let server = Server::new(Config::from_env())?;
//! server.run().await?;
//! ```

mod handlers;
mod state;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::{ApiError, Result};

pub use handlers::{create_router, health_check, HealthResponse};
pub use state::AppState;

/// LLM Models API server
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new server
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Get the router for the server
    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.state))
    }

    /// Shared state
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Bind the configured address and serve until the process stops
    pub async fn run(&self) -> Result<()> {
        let config = &self.state.config;
        let addr = config.server.listen_addr();

        tracing::info!("LLM Models API starting...");
        tracing::info!("Upstream: {}", config.upstream.url);
        tracing::info!(
            "Cache TTL: {}s, CORS: {}",
            config.cache.ttl_secs,
            if config.server.cors { "any origin" } else { "disabled" }
        );

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::Server(format!("Failed to bind to {}: {}", addr, e)))?;
        tracing::info!("Listening on http://{}", addr);

        axum::serve(listener, self.router())
            .await
            .map_err(|e| ApiError::Server(format!("Server error: {}", e)))?;

        Ok(())
    }
}
