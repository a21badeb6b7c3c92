//! Database operations for operations-chat messages.
//!
//! Delivery fan-out is the real-time provider's job; this table only backs
//! the console's history view.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use freightline_core::{ChatMessageId, UserId};

use super::RepositoryError;
use crate::models::chat::ChatMessage;

/// Internal row type for chat message queries.
#[derive(Debug, sqlx::FromRow)]
struct ChatMessageRow {
    id: i32,
    sender_id: i32,
    channel: String,
    body: String,
    created_at: DateTime<Utc>,
}

impl From<ChatMessageRow> for ChatMessage {
    fn from(row: ChatMessageRow) -> Self {
        Self {
            id: ChatMessageId::new(row.id),
            sender_id: UserId::new(row.sender_id),
            channel: row.channel,
            body: row.body,
            created_at: row.created_at,
        }
    }
}

/// Repository for chat database operations.
pub struct ChatMessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ChatMessageRepository<'a> {
    /// Create a new chat message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a message before it is fanned out to channel subscribers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add_message(
        &self,
        sender_id: UserId,
        channel: &str,
        body: &str,
    ) -> Result<ChatMessage, RepositoryError> {
        let row = sqlx::query_as::<_, ChatMessageRow>(
            "INSERT INTO chat_messages (sender_id, channel, body)
             VALUES ($1, $2, $3)
             RETURNING id, sender_id, channel, body, created_at",
        )
        .bind(sender_id.as_i32())
        .bind(channel)
        .bind(body)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Most recent messages on a channel, oldest first, capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent_messages(
        &self,
        channel: &str,
        limit: i64,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChatMessageRow>(
            "SELECT id, sender_id, channel, body, created_at
             FROM (
                 SELECT id, sender_id, channel, body, created_at
                 FROM chat_messages
                 WHERE channel = $1
                 ORDER BY created_at DESC, id DESC
                 LIMIT $2
             ) recent
             ORDER BY created_at ASC, id ASC",
        )
        .bind(channel)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
