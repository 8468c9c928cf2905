//! OpenAI adapter for the completion and embedding ports.
//!
//! One provider serves both ports: chat completions for general replies
//! and the embeddings endpoint for FAQ similarity. Every request carries
//! the client-level timeout; expiry and transport failures normalize to
//! the port's `Unavailable` error.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{CompletionError, CompletionProvider, EmbeddingError, EmbeddingProvider};

/// System framing for general replies: the assistant represents the
/// moving company and keeps answers short and on topic.
const SYSTEM_PROMPT: &str = "You are a helpful assistant and a representative of My Good \
    Movers. Provide summarized responses to user queries and the best possible solution. \
    Stay on the topic that we are a moving company, and encourage the user to use our \
    services.";

/// Configuration for the OpenAI adapter.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub completion_model: String,
    pub embedding_model: String,
    pub timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl OpenAiConfig {
    /// Creates a configuration with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.openai.com/v1".to_string(),
            completion_model: "gpt-4o-mini".to_string(),
            embedding_model: "text-embedding-ada-002".to_string(),
            timeout: Duration::from_secs(30),
            max_tokens: 200,
            temperature: 0.7,
        }
    }

    /// Sets the base URL (used to point tests at a stub server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the completion model.
    pub fn with_completion_model(mut self, model: impl Into<String>) -> Self {
        self.completion_model = model.into();
        self
    }

    /// Sets the embedding model.
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API adapter.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiProvider {
    /// Creates the provider; the HTTP client carries the configured
    /// timeout so no call can hang past it.
    pub fn new(config: OpenAiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.config.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: self.config.completion_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|err| CompletionError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompletionError::Unavailable(format!(
                "completion endpoint returned {}",
                status
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|err| CompletionError::Malformed(err.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| CompletionError::Malformed("response carried no choices".to_string()))
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let request = EmbeddingRequest {
            model: self.config.embedding_model.clone(),
            input: text.to_string(),
        };

        let response = self
            .client
            .post(self.embeddings_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|err| EmbeddingError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::Unavailable(format!(
                "embedding endpoint returned {}",
                status
            )));
        }

        let body: EmbeddingResponse = response
            .json()
            .await
            .map_err(|err| EmbeddingError::Malformed(err.to_string()))?;

        body.data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| EmbeddingError::Malformed("response carried no embedding".to_string()))
    }
}

// ── Wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest {
    model: String,
    input: String,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}
