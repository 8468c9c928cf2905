//! Conversation Store Port - the system of record for session state.
//!
//! A session is a keyed record holding identity fields, a monotonic turn
//! counter, an ordered turn log, free-form context slots, and the move
//! details record. The numbered-key layout of the turn log is an adapter
//! detail; this port only exposes an appendable ordered sequence.
//!
//! # Ordering
//!
//! [`ConversationStore::append_turn`] must be atomic per chat key: two
//! concurrent appends for the same session may not interleave their
//! user/assistant pairs. Adapters use a compare-free atomic update (Redis
//! Lua script, or a lock held across the whole append in memory) rather
//! than read-modify-write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::foundation::{ChatId, DomainError, ErrorCode};
use crate::domain::session::MoveDetails;

/// Errors a conversation store can surface.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Read-only lookup on an identifier that was never created.
    #[error("chat session '{0}' does not exist")]
    SessionNotFound(String),

    /// The backing store is unreachable or rejected the operation.
    #[error("conversation store unavailable: {0}")]
    Unavailable(String),

    /// The stored record does not parse back into session state.
    #[error("conversation record corrupted: {0}")]
    Corrupted(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SessionNotFound(chat_id) => DomainError::session_not_found(chat_id),
            StoreError::Unavailable(msg) => DomainError::new(ErrorCode::StoreUnavailable, msg),
            StoreError::Corrupted(msg) => DomainError::new(ErrorCode::InternalError, msg),
        }
    }
}

/// Username, contact number, and ordered turn log of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatHistory {
    pub username: String,
    pub contact_no: String,
    pub messages: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Port for session persistence.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Creates the session record if none exists.
    ///
    /// Idempotent: an existing record is never touched, field by field.
    async fn ensure(&self, chat_id: &ChatId) -> Result<(), StoreError>;

    /// Atomically appends one user entry then one assistant entry to the
    /// session's turn log, advancing the turn counter by 2.
    async fn append_turn(
        &self,
        chat_id: &ChatId,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<(), StoreError>;

    /// Reads a free-form context slot.
    async fn get_context(&self, chat_id: &ChatId, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a free-form context slot.
    async fn set_context(&self, chat_id: &ChatId, key: &str, value: &str)
        -> Result<(), StoreError>;

    /// Overwrites the full move-details record and the formatted cost.
    async fn record_move_details(
        &self,
        chat_id: &ChatId,
        details: &MoveDetails,
        estimated_cost: &str,
    ) -> Result<(), StoreError>;

    /// Returns the session's identity fields and ordered turn log.
    ///
    /// Unlike the write paths, this fails with
    /// [`StoreError::SessionNotFound`] for an identifier that was never
    /// created.
    async fn get_history(&self, chat_id: &ChatId) -> Result<ChatHistory, StoreError>;
}
