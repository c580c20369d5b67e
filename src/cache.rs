//! Time-bounded cache of the upstream model list.
//!
//! The cached list sits behind an `Arc` and is never written after it is
//! stored; request handlers only ever read it. Failed fetches are not
//! cached. Concurrent misses share a single upstream fetch.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};

use crate::error::Result;
use crate::models::ModelRecord;

/// Shared, read-only model list
pub type SharedModels = Arc<Vec<ModelRecord>>;

/// Cached list with its fetch time
struct CacheEntry {
    models: SharedModels,
    fetched_at: Instant,
}

/// TTL cache for the upstream model list
pub struct ModelCache {
    entry: RwLock<Option<CacheEntry>>,
    // Held across a miss so only one caller fetches
    refresh: Mutex<()>,
    ttl: Duration,
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(600))
    }
}

impl ModelCache {
    /// Create a cache; a zero TTL disables caching
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            refresh: Mutex::new(()),
            ttl,
        }
    }

    /// Cache that never stores anything
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Configured TTL
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Check if caching is enabled
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Return the cached list if fresh, otherwise run `fetch` and store its
    /// result.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> Result<SharedModels>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ModelRecord>>>,
    {
        if !self.is_enabled() {
            return fetch().await.map(Arc::new);
        }

        if let Some(models) = self.get().await {
            tracing::debug!("Model cache hit ({} models)", models.len());
            return Ok(models);
        }

        let _refresh = self.refresh.lock().await;

        // Another caller may have filled the entry while we waited.
        if let Some(models) = self.get().await {
            tracing::debug!("Model cache filled by concurrent fetch");
            return Ok(models);
        }

        let models = Arc::new(fetch().await?);

        *self.entry.write().await = Some(CacheEntry {
            models: Arc::clone(&models),
            fetched_at: Instant::now(),
        });
        tracing::debug!("Cached {} models for {:?}", models.len(), self.ttl);

        Ok(models)
    }

    /// Cached list, if present and younger than the TTL
    pub async fn get(&self) -> Option<SharedModels> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.models))
    }

    /// Check whether a fresh entry exists
    pub async fn is_fresh(&self) -> bool {
        self.get().await.is_some()
    }

    /// Drop the cached entry
    pub async fn invalidate(&self) {
        self.entry.write().await.take();
    }
}
