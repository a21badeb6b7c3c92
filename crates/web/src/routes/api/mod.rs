//! JSON API route handlers.
//!
//! Every response uses the same envelope: `{ "success": true, "data": ... }`
//! on success, `{ "success": false, "message": ... }` on error.

pub mod chat;
pub mod realtime;
pub mod shipments;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// JSON success envelope.
#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataBody<T> {
    /// Wrap a payload; `success` is always true here.
    pub const fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/active-shipment", get(shipments::active_shipment_count))
        .route("/shipments", get(shipments::list))
        .route("/pusher-auth", post(realtime::pusher_auth))
        .route("/chat/messages", post(chat::post_message))
}
