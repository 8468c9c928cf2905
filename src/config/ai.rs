//! OpenAI provider configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// OpenAI configuration (completions and embeddings)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the OpenAI API
    #[serde(default)]
    pub api_key: Option<Secret<String>>,

    /// Base URL for the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat completion model
    #[serde(default = "default_completion_model")]
    pub completion_model: String,

    /// Embedding model
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_none() {
            return Err(ValidationError::MissingRequired("AI_API_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            completion_model: default_completion_model(),
            embedding_model: default_embedding_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_completion_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_embedding_model() -> String {
    "text-embedding-ada-002".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_fails_validation() {
        let config = AiConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired("AI_API_KEY"))
        ));
    }

    #[test]
    fn defaults_carry_model_names() {
        let config = AiConfig::default();
        assert_eq!(config.completion_model, "gpt-4o-mini");
        assert_eq!(config.embedding_model, "text-embedding-ada-002");
    }
}
