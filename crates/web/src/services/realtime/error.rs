//! Real-time provider error types.

use thiserror::Error;

/// Errors from the real-time provider client.
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// The trigger request could not be sent.
    #[error("request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {body}")]
    Api { status: u16, body: String },

    /// A payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
