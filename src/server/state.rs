//! Server state shared across handlers.

use crate::cache::{ModelCache, SharedModels};
use crate::config::Config;
use crate::error::Result;
use crate::upstream::UpstreamClient;

/// Application state shared across handlers
pub struct AppState {
    /// Server configuration
    pub config: Config,
    /// Upstream catalogue client
    pub upstream: UpstreamClient,
    /// Cached upstream list
    pub cache: ModelCache,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Result<Self> {
        let upstream = UpstreamClient::new(&config.upstream)?;
        let cache = ModelCache::new(config.cache.ttl());

        Ok(Self {
            config,
            upstream,
            cache,
        })
    }

    /// Current model list, from the cache or a fresh upstream fetch
    pub async fn models(&self) -> Result<SharedModels> {
        self.cache
            .get_or_fetch(|| self.upstream.fetch_models())
            .await
    }

    /// `Cache-Control` value for `/models` responses
    pub fn cache_control(&self) -> String {
        format!("max-age={}", self.config.cache.ttl_secs)
    }
}
