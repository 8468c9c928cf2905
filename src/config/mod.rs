//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CHATBOT_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use good_movers_chatbot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod faq;
mod maps;
mod redis;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use faq::FaqConfig;
pub use maps::MapsConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the chatbot service.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Redis configuration (conversation store)
    #[serde(default)]
    pub redis: RedisConfig,

    /// OpenAI configuration (completions and embeddings)
    #[serde(default)]
    pub ai: AiConfig,

    /// Google Maps configuration (driving distance)
    #[serde(default)]
    pub maps: MapsConfig,

    /// FAQ dataset and matching configuration
    #[serde(default)]
    pub faq: FaqConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `CHATBOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CHATBOT__SERVER__PORT=5000` -> `server.port = 5000`
    /// - `CHATBOT__AI__API_KEY=...` -> `ai.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CHATBOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid,
    /// including missing API keys for the AI and maps providers.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.redis.validate()?;
        self.ai.validate()?;
        self.maps.validate()?;
        self.faq.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("CHATBOT__AI__API_KEY", "sk-test-xxx");
        env::set_var("CHATBOT__MAPS__API_KEY", "maps-test-xxx");
    }

    fn clear_env() {
        env::remove_var("CHATBOT__AI__API_KEY");
        env::remove_var("CHATBOT__MAPS__API_KEY");
        env::remove_var("CHATBOT__SERVER__PORT");
        env::remove_var("CHATBOT__SERVER__ENVIRONMENT");
        env::remove_var("CHATBOT__FAQ__SIMILARITY_THRESHOLD");
    }

    #[test]
    fn load_and_validate_with_minimal_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.redis.url, "redis://localhost:6379");
    }

    #[test]
    fn server_defaults_apply_when_unset() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.faq.similarity_threshold, 0.75);
    }

    #[test]
    fn custom_port_overrides_default() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CHATBOT__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn production_environment_is_detected() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("CHATBOT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }
}
