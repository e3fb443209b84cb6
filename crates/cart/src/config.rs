//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SANDPIPER_CATALOG_URL` - Base URL of the product/stock service
//!
//! ## Optional
//! - `SANDPIPER_DATA_DIR` - Directory holding the durable cart slot
//!   (default: `.sandpiper`)
//! - `SANDPIPER_HTTP_TIMEOUT_SECS` - Catalog request timeout in seconds
//!   (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart library configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base URL of the remote product/stock service
    pub catalog_url: Url,
    /// Directory holding the durable cart slot
    pub data_dir: PathBuf,
    /// Timeout applied to catalog and stock requests
    pub http_timeout: Duration,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or fail to
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog_url = get_required_env("SANDPIPER_CATALOG_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SANDPIPER_CATALOG_URL".to_string(), e.to_string())
            })?;
        let data_dir = PathBuf::from(get_env_or_default("SANDPIPER_DATA_DIR", ".sandpiper"));
        let http_timeout = get_env_or_default("SANDPIPER_HTTP_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SANDPIPER_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            catalog_url,
            data_dir,
            http_timeout,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
