//! Channel-authorization endpoint for the real-time provider.
//!
//! The browser SDK calls this when it wants to join a `presence-*` or
//! `admin-{id}` channel; the gate decides, the client signs.

use axum::{
    Json,
    extract::{FromRequest, Request, State},
    http::header,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::OptionalAuth;
use crate::services::realtime::{ChannelAuth, GateDenied, authorize};
use crate::state::AppState;

/// Channel-authorization request body.
///
/// The SDK posts form-encoded by default; JSON is accepted for API clients.
#[derive(Debug, Deserialize)]
pub struct ChannelAuthRequest {
    pub socket_id: String,
    pub channel_name: String,
}

/// Accept a body as either JSON or a form, by content type.
pub struct JsonOrForm<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: serde::de::DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        if is_json {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            Ok(Self(value))
        } else {
            let axum::Form(value) = axum::Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            Ok(Self(value))
        }
    }
}

/// Socket ids look like `1234.5678`; reject anything else up front.
fn validate_socket_id(socket_id: &str) -> Result<()> {
    let valid = socket_id.split_once('.').is_some_and(|(a, b)| {
        !a.is_empty()
            && !b.is_empty()
            && a.bytes().all(|c| c.is_ascii_digit())
            && b.bytes().all(|c| c.is_ascii_digit())
    });

    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest("invalid socket_id".to_string()))
    }
}

/// `POST /api/pusher-auth`
///
/// 401 without a session, 403 for a channel the session may not join,
/// 400 for a malformed body, otherwise the signed authorization payload.
#[instrument(skip(state, user, body), fields(channel = %body.channel_name))]
pub async fn pusher_auth(
    OptionalAuth(user): OptionalAuth,
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<ChannelAuthRequest>,
) -> Result<Json<ChannelAuth>> {
    validate_socket_id(&body.socket_id)?;

    let grant = authorize(&body.channel_name, user.as_ref()).map_err(|denied| match denied {
        GateDenied::Unauthenticated => AppError::Unauthorized(denied.to_string()),
        GateDenied::Forbidden => AppError::Forbidden(denied.to_string()),
    })?;

    let auth = state.realtime().sign_subscription(&body.socket_id, &grant)?;

    Ok(Json(auth))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_id_validation() {
        assert!(validate_socket_id("1234.5678").is_ok());
        assert!(validate_socket_id("1.2").is_ok());

        assert!(validate_socket_id("").is_err());
        assert!(validate_socket_id("12345678").is_err());
        assert!(validate_socket_id("12.34.56").is_err());
        assert!(validate_socket_id("abc.def").is_err());
        assert!(validate_socket_id(".5678").is_err());
        assert!(validate_socket_id("1234.").is_err());
    }
}
