//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (for the `serve` command)

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Default upstream model catalogue
pub const DEFAULT_UPSTREAM_URL: &str = "https://openrouter.ai/api/v1/models";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream catalogue configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Model list cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ApiError::Config(format!("Failed to read config file: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config: {e}")))
    }

    /// Default config file location (`<config dir>/llm-models/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("llm-models").join("config.toml"))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::default().apply_lookup(lookup)
    }

    /// Override this config with any environment variables that are set
    pub fn apply_env(self) -> Self {
        self.apply_lookup(|key| std::env::var(key).ok())
    }

    /// Override this config with every variable `lookup` returns.
    ///
    /// A variable that is present always wins, even when its value equals
    /// the built-in default. Unparsable values are ignored.
    pub fn apply_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Server settings
        if let Some(host) = lookup("LLM_MODELS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("LLM_MODELS_PORT").or_else(|| lookup("PORT")) {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            } else {
                tracing::warn!("Invalid port value {:?}, keeping {}", port, self.server.port);
            }
        }
        if let Some(cors) = lookup("LLM_MODELS_CORS") {
            if let Ok(cors) = cors.parse() {
                self.server.cors = cors;
            }
        }

        // Upstream settings
        if let Some(url) = lookup("LLM_MODELS_UPSTREAM") {
            self.upstream.url = url;
        }
        if let Some(val) = lookup("LLM_MODELS_TIMEOUT_SECS") {
            if let Ok(val) = val.parse() {
                self.upstream.timeout_secs = val;
            }
        }

        // Cache settings
        if let Some(val) = lookup("LLM_MODELS_CACHE_TTL_SECS") {
            if let Ok(val) = val.parse() {
                self.cache.ttl_secs = val;
            }
        }

        self
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Get the full listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream catalogue configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Full URL of the model list endpoint
    pub url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent upstream
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: 30,
            user_agent: format!("llm-models-api/{}", crate::VERSION),
        }
    }
}

impl UpstreamConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Model list cache configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache TTL in seconds (0 disables caching)
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 600 } // 10 minutes
    }
}

impl CacheConfig {
    /// TTL as a `Duration`
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}
