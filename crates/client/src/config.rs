//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `NOKORI_API_BASE_URL` - Base URL of the remote inventory service
//!
//! ## Optional
//! - `NOKORI_PAGE_SIZE` - Products shown per page (default: 10, minimum: 1)

use thiserror::Error;
use url::Url;

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Store-management client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote inventory service.
    pub api_base_url: Url,
    /// Products shown per page in the inventory view.
    pub page_size: usize,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env("NOKORI_API_BASE_URL")?;
        let api_base_url = Url::parse(&api_base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("NOKORI_API_BASE_URL".to_string(), e.to_string())
        })?;

        let page_size = match std::env::var("NOKORI_PAGE_SIZE") {
            Ok(raw) => {
                let parsed = raw.parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar("NOKORI_PAGE_SIZE".to_string(), e.to_string())
                })?;
                if parsed == 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "NOKORI_PAGE_SIZE".to_string(),
                        "page size must be at least 1".to_string(),
                    ));
                }
                parsed
            }
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            api_base_url,
            page_size,
        })
    }

    /// Build a configuration directly, for embedders and tests.
    #[must_use]
    pub const fn new(api_base_url: Url, page_size: usize) -> Self {
        Self {
            api_base_url,
            page_size,
        }
    }
}

fn get_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
