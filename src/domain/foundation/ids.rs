//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier naming one ongoing conversation.
///
/// The identifier scopes all session state. It is either supplied by the
/// caller (any non-empty string, no format assumed) or generated as a
/// random UUID when absent. The core treats it as opaque text; only
/// uniqueness matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(String);

impl ChatId {
    /// Creates a new random chat identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a caller-supplied identifier, generating one if the input is
    /// absent or blank.
    pub fn from_request(raw: Option<String>) -> Self {
        match raw {
            Some(s) if !s.trim().is_empty() => Self(s),
            _ => Self::generate(),
        }
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChatId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChatId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ChatId::generate(), ChatId::generate());
    }

    #[test]
    fn caller_supplied_id_is_kept_verbatim() {
        let id = ChatId::from_request(Some("session-42".to_string()));
        assert_eq!(id.as_str(), "session-42");
    }

    #[test]
    fn blank_id_is_replaced_with_generated_one() {
        let id = ChatId::from_request(Some("   ".to_string()));
        assert!(!id.as_str().trim().is_empty());
        assert_ne!(id.as_str(), "   ");
    }

    #[test]
    fn missing_id_is_generated() {
        let id = ChatId::from_request(None);
        assert!(!id.as_str().is_empty());
    }
}
