#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "web")]
pub mod web;

use crate::utils::error::{FinderError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com";

/// Places API credentials and connection settings, loaded once at startup
/// and passed by reference into the client. A missing key is fatal.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Total tries per request, including the first one.
    pub retry_attempts: u32,
}

impl ApiConfig {
    /// Load from the environment, reading an optional `.env` file first.
    /// `PLACES_BASE_URL` exists so tests can point the client at a mock
    /// server; it defaults to the real endpoint.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key =
            std::env::var("GOOGLE_API_KEY").map_err(|_| FinderError::MissingConfig {
                field: "GOOGLE_API_KEY".to_string(),
            })?;
        let base_url = std::env::var("PLACES_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let config = Self::new(api_key, base_url);
        config.validate()?;
        Ok(config)
    }

    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            timeout_secs: 30,
            retry_attempts: 3,
        }
    }
}

impl Validate for ApiConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("GOOGLE_API_KEY", &self.api_key)?;
        validate_url("base_url", &self.base_url)?;
        Ok(())
    }
}
