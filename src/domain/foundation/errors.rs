//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction or request validation.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,

    // Not found errors
    SessionNotFound,

    // Provider errors (external collaborators)
    DistanceUnavailable,
    EmbeddingUnavailable,
    CompletionUnavailable,

    // Infrastructure errors
    StoreUnavailable,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::DistanceUnavailable => "DISTANCE_UNAVAILABLE",
            ErrorCode::EmbeddingUnavailable => "EMBEDDING_UNAVAILABLE",
            ErrorCode::CompletionUnavailable => "COMPLETION_UNAVAILABLE",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

impl ErrorCode {
    /// Whether this code represents a failed external collaborator call.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            ErrorCode::DistanceUnavailable
                | ErrorCode::EmbeddingUnavailable
                | ErrorCode::CompletionUnavailable
        )
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a session-not-found error for a chat identifier.
    pub fn session_not_found(chat_id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::SessionNotFound,
            format!("Chat session '{}' does not exist", chat_id),
        )
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::InvalidFormat { .. } => ErrorCode::ValidationFailed,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("origin");
        assert_eq!(format!("{}", err), "Field 'origin' cannot be empty");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::session_not_found("abc-123");
        assert_eq!(
            format!("{}", err),
            "[SESSION_NOT_FOUND] Chat session 'abc-123' does not exist"
        );
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::validation("move_size", "Missing required fields.")
            .with_detail("reason", "absent");

        assert_eq!(err.details.get("field"), Some(&"move_size".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"absent".to_string()));
    }

    #[test]
    fn provider_codes_are_flagged_as_provider_failures() {
        assert!(ErrorCode::DistanceUnavailable.is_provider_failure());
        assert!(ErrorCode::EmbeddingUnavailable.is_provider_failure());
        assert!(!ErrorCode::SessionNotFound.is_provider_failure());
    }
}
