//! Chat message API handlers.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use crate::db::ChatMessageRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::ChatMessageView;
use crate::services::realtime::ChannelName;
use crate::state::AppState;

use super::DataBody;

/// Event name fanned out to channel subscribers.
const NEW_MESSAGE_EVENT: &str = "new-message";

/// Maximum message length.
const MAX_BODY_LENGTH: usize = 2000;

/// Request body for posting a chat message.
#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub channel: String,
    pub body: String,
}

/// `POST /api/chat/messages`
///
/// Store a message and fan it out on its channel. Operations staff only;
/// agents post both on the shared ops channel and on customer channels.
#[instrument(skip(state, admin, request), fields(channel = %request.channel))]
pub async fn post_message(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<PostMessageRequest>,
) -> Result<Json<DataBody<ChatMessageView>>> {
    // Only the two recognized channel shapes carry chat
    if ChannelName::parse(&request.channel).is_none() {
        return Err(AppError::BadRequest("unrecognized channel".to_string()));
    }

    let body = request.body.trim();
    if body.is_empty() {
        return Err(AppError::BadRequest("message body is empty".to_string()));
    }
    if body.len() > MAX_BODY_LENGTH {
        return Err(AppError::BadRequest(format!(
            "message body exceeds {MAX_BODY_LENGTH} characters"
        )));
    }

    let message = ChatMessageRepository::new(state.pool())
        .add_message(admin.id, &request.channel, body)
        .await?;

    let view = ChatMessageView::new(&message, admin.display_name());

    // The message is stored either way; subscribers reconcile from history
    // if the fan-out fails.
    if let Err(e) = state
        .realtime()
        .trigger(&request.channel, NEW_MESSAGE_EVENT, &view)
        .await
    {
        tracing::warn!("trigger failed after message {} was stored: {e}", message.id);
    }

    Ok(Json(DataBody::new(view)))
}
