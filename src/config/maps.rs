//! Google Maps provider configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Distance Matrix API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MapsConfig {
    /// API key for the Distance Matrix API
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Base URL for the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl MapsConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate maps configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_none() {
            return Err(ValidationError::MissingRequired("MAPS_API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_timeout() -> u64 {
    10
}
