//! In-memory conversation store for tests and local development.
//!
//! Semantics mirror the Redis adapter: one field map per chat, a numeric
//! turn counter, numbered turn-log fields. The whole map sits behind one
//! mutex, so an append is trivially atomic per key (and globally).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::foundation::ChatId;
use crate::domain::session::{MoveDetails, TurnRole, UNKNOWN_FIELD};
use crate::ports::{ChatHistory, ConversationStore, StoreError};

/// Mutex-guarded map of chat id to session fields.
#[derive(Default)]
pub struct InMemoryConversationStore {
    sessions: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn default_record() -> HashMap<String, String> {
        HashMap::from([
            ("username".to_string(), UNKNOWN_FIELD.to_string()),
            ("contact_no".to_string(), UNKNOWN_FIELD.to_string()),
            ("index".to_string(), "0".to_string()),
            ("created_at".to_string(), Utc::now().to_rfc3339()),
        ])
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn ensure(&self, chat_id: &ChatId) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions
            .entry(chat_id.as_str().to_string())
            .or_insert_with(Self::default_record);
        Ok(())
    }

    async fn append_turn(
        &self,
        chat_id: &ChatId,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<(), StoreError> {
        // Lock held across read-increment-write: the pair stays adjacent
        // under concurrent appends.
        let mut sessions = self.sessions.lock().unwrap();
        let record = sessions
            .entry(chat_id.as_str().to_string())
            .or_insert_with(Self::default_record);

        let index: u64 = record
            .get("index")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);
        record.insert(
            format!("message:{}", index),
            TurnRole::User.record_line(user_text),
        );
        record.insert(
            format!("message:{}", index + 1),
            TurnRole::Assistant.record_line(assistant_text),
        );
        record.insert("index".to_string(), (index + 2).to_string());
        Ok(())
    }

    async fn get_context(&self, chat_id: &ChatId, key: &str) -> Result<Option<String>, StoreError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .get(chat_id.as_str())
            .and_then(|record| record.get(key).cloned()))
    }

    async fn set_context(
        &self,
        chat_id: &ChatId,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().unwrap();
        sessions
            .entry(chat_id.as_str().to_string())
            .or_insert_with(Self::default_record)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn record_move_details(
        &self,
        chat_id: &ChatId,
        details: &MoveDetails,
        estimated_cost: &str,
    ) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().unwrap();
        let record = sessions
            .entry(chat_id.as_str().to_string())
            .or_insert_with(Self::default_record);

        record.insert("username".to_string(), details.name.clone());
        record.insert("contact_no".to_string(), details.contact_no.clone());
        record.insert("origin".to_string(), details.origin.clone());
        record.insert("destination".to_string(), details.destination.clone());
        record.insert("move_date".to_string(), details.move_date.clone());
        record.insert("move_size".to_string(), details.move_size.clone());
        record.insert(
            "additional_services".to_string(),
            details.additional_services.join(", "),
        );
        if let Some(distance) = details.distance_miles {
            record.insert("distance".to_string(), distance.to_string());
        }
        record.insert("estimated_cost".to_string(), estimated_cost.to_string());
        Ok(())
    }

    async fn get_history(&self, chat_id: &ChatId) -> Result<ChatHistory, StoreError> {
        let sessions = self.sessions.lock().unwrap();
        let record = sessions
            .get(chat_id.as_str())
            .ok_or_else(|| StoreError::SessionNotFound(chat_id.to_string()))?;

        let index: u64 = record
            .get("index")
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0);
        let messages = (0..index)
            .filter_map(|i| record.get(&format!("message:{}", i)).cloned())
            .collect();

        Ok(ChatHistory {
            username: record
                .get("username")
                .cloned()
                .unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            contact_no: record
                .get("contact_no")
                .cloned()
                .unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            messages,
            created_at: record
                .get("created_at")
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        })
    }
}
