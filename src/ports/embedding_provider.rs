//! Embedding Provider Port - interface to the semantic-similarity service.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors an embedding provider can surface.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingError {
    /// Empty input cannot be embedded.
    #[error("cannot embed empty input")]
    EmptyInput,

    /// The provider call failed, timed out, or was rejected.
    #[error("embedding provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered but the payload was not usable.
    #[error("embedding provider returned a malformed payload: {0}")]
    Malformed(String),
}

impl From<EmbeddingError> for DomainError {
    fn from(err: EmbeddingError) -> Self {
        DomainError::new(ErrorCode::EmbeddingUnavailable, err.to_string())
    }
}

/// Port for text embedding.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the fixed-length embedding vector for a text.
    ///
    /// Implementations reject empty input with [`EmbeddingError::EmptyInput`]
    /// before any network call.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
