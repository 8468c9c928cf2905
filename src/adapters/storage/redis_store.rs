//! Redis-backed conversation store for production deployments.
//!
//! Each chat session is one Redis hash under `chat:<id>`. The turn log is
//! numbered `message:<n>` fields with an `index` counter; the append runs
//! as a Lua script so the read-increment-write is atomic per key and
//! concurrent appends for the same chat can never interleave a
//! user/assistant pair.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Script};
use std::collections::HashMap;

use crate::domain::foundation::ChatId;
use crate::domain::session::{MoveDetails, TurnRole, UNKNOWN_FIELD};
use crate::ports::{ChatHistory, ConversationStore, StoreError};

/// Appends a user line and an assistant line, advancing the counter by 2.
static APPEND_TURN_SCRIPT: Lazy<Script> = Lazy::new(|| {
    Script::new(
        r#"
        local index = tonumber(redis.call('HGET', KEYS[1], 'index') or '0')
        redis.call('HSET', KEYS[1], 'message:' .. index, ARGV[1])
        redis.call('HSET', KEYS[1], 'message:' .. (index + 1), ARGV[2])
        redis.call('HSET', KEYS[1], 'index', index + 2)
        return index + 2
        "#,
    )
});

/// Redis adapter for the conversation store port.
#[derive(Clone)]
pub struct RedisConversationStore {
    conn: MultiplexedConnection,
}

impl RedisConversationStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    fn chat_key(chat_id: &ChatId) -> String {
        format!("chat:{}", chat_id)
    }
}

fn store_err(err: redis::RedisError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl ConversationStore for RedisConversationStore {
    async fn ensure(&self, chat_id: &ChatId) -> Result<(), StoreError> {
        let key = Self::chat_key(chat_id);
        let mut conn = self.conn.clone();

        // HSETNX per field: idempotent, never clobbers an existing value.
        redis::pipe()
            .hset_nx(&key, "username", UNKNOWN_FIELD)
            .ignore()
            .hset_nx(&key, "contact_no", UNKNOWN_FIELD)
            .ignore()
            .hset_nx(&key, "index", 0i64)
            .ignore()
            .hset_nx(&key, "created_at", Utc::now().to_rfc3339())
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(store_err)
    }

    async fn append_turn(
        &self,
        chat_id: &ChatId,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<(), StoreError> {
        let key = Self::chat_key(chat_id);
        let mut conn = self.conn.clone();

        APPEND_TURN_SCRIPT
            .key(&key)
            .arg(TurnRole::User.record_line(user_text))
            .arg(TurnRole::Assistant.record_line(assistant_text))
            .invoke_async::<_, i64>(&mut conn)
            .await
            .map(|_| ())
            .map_err(store_err)
    }

    async fn get_context(&self, chat_id: &ChatId, key: &str) -> Result<Option<String>, StoreError> {
        let chat_key = Self::chat_key(chat_id);
        let mut conn = self.conn.clone();

        conn.hget::<_, _, Option<String>>(&chat_key, key)
            .await
            .map_err(store_err)
    }

    async fn set_context(
        &self,
        chat_id: &ChatId,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let chat_key = Self::chat_key(chat_id);
        let mut conn = self.conn.clone();

        conn.hset::<_, _, _, ()>(&chat_key, key, value)
            .await
            .map_err(store_err)
    }

    async fn record_move_details(
        &self,
        chat_id: &ChatId,
        details: &MoveDetails,
        estimated_cost: &str,
    ) -> Result<(), StoreError> {
        let chat_key = Self::chat_key(chat_id);
        let mut conn = self.conn.clone();

        let mut fields: Vec<(&str, String)> = vec![
            ("username", details.name.clone()),
            ("contact_no", details.contact_no.clone()),
            ("origin", details.origin.clone()),
            ("destination", details.destination.clone()),
            ("move_date", details.move_date.clone()),
            ("move_size", details.move_size.clone()),
            (
                "additional_services",
                details.additional_services.join(", "),
            ),
            ("estimated_cost", estimated_cost.to_string()),
        ];
        if let Some(distance) = details.distance_miles {
            fields.push(("distance", distance.to_string()));
        }

        conn.hset_multiple::<_, _, _, ()>(&chat_key, &fields)
            .await
            .map_err(store_err)
    }

    async fn get_history(&self, chat_id: &ChatId) -> Result<ChatHistory, StoreError> {
        let chat_key = Self::chat_key(chat_id);
        let mut conn = self.conn.clone();

        let exists: bool = conn.exists(&chat_key).await.map_err(store_err)?;
        if !exists {
            return Err(StoreError::SessionNotFound(chat_id.to_string()));
        }

        let record: HashMap<String, String> =
            conn.hgetall(&chat_key).await.map_err(store_err)?;

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
