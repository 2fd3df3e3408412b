//! Centralized configuration for Reelfind.
//!
//! All tunable parameters are defined here to avoid hard-coded values
//! scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Central configuration for all Reelfind components.
///
/// Groups related settings into logical sections. Supports environment
/// variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct ReelfindConfig {
    pub api: ApiConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl ReelfindConfig {
    /// Default configuration with environment overrides applied.
    ///
    /// `OMDB_API_KEY` sets the API key, `OMDB_BASE_URL` replaces the API
    /// endpoint (useful for pointing tests at a local stub), and
    /// `REELFIND_STATE_FILE` relocates the durable state file.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("OMDB_API_KEY") {
            config.api.api_key = Some(key);
        }
        if let Ok(base_url) = std::env::var("OMDB_BASE_URL") {
            config.api.base_url = base_url;
        }
        if let Ok(path) = std::env::var("REELFIND_STATE_FILE") {
            config.storage.state_file = PathBuf::from(path);
        }

        config
    }
}

/// External movie API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Endpoint of the movie database API.
    pub base_url: String,
    /// API key appended to every request. The free tier works without one
    /// up to a daily request cap.
    pub api_key: Option<String>,
    /// Per-request timeout for lookups.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.omdbapi.com".to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Web server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Durable search state storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the JSON file holding the persisted search parameters.
    pub state_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("reelfind-state.json"),
        }
    }
}
