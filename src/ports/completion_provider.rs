//! Completion Provider Port - interface to the LLM text-completion service.
//!
//! The general-chat path hands the provider a prompt that already carries
//! the accumulated conversation context; the provider returns free text or
//! a normalized error. Nothing provider-specific crosses this boundary.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors a completion provider can surface.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// The provider call failed, timed out, or was rejected.
    #[error("completion provider unavailable: {0}")]
    Unavailable(String),

    /// The provider answered but the payload was not usable.
    #[error("completion provider returned a malformed payload: {0}")]
    Malformed(String),
}

impl From<CompletionError> for DomainError {
    fn from(err: CompletionError) -> Self {
        DomainError::new(ErrorCode::CompletionUnavailable, err.to_string())
    }
}

/// Port for LLM text completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generates a reply for the given prompt.
    ///
    /// The prompt may contain prior turns; the implementation supplies its
    /// own system framing. Implementations apply a bounded timeout and
    /// map expiry to [`CompletionError::Unavailable`].
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}
