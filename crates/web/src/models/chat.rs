//! Operations-chat models.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use freightline_core::{ChatMessageId, UserId};

/// A stored chat message.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub sender_id: UserId,
    /// Channel the message was posted on (`presence-ops` or `admin-{id}`).
    pub channel: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Chat message as rendered on the wire and in trigger payloads.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageView {
    pub id: ChatMessageId,
    pub sender_id: UserId,
    pub sender_name: String,
    pub body: String,
    pub created_at: String,
}

impl ChatMessageView {
    /// Build the wire view, pairing the stored row with the sender's
    /// display name resolved from the session.
    #[must_use]
    pub fn new(message: &ChatMessage, sender_name: &str) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            sender_name: sender_name.to_string(),
            body: message.body.clone(),
            created_at: message
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
