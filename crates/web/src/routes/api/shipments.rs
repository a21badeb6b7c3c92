//! Shipment API handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::{ShipmentRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, ShipmentView};
use crate::state::AppState;

use super::DataBody;

/// Re-check that the session's user row still exists.
///
/// A valid cookie can outlive its account; such a session is a bad request,
/// not a server error.
async fn ensure_user_exists(state: &AppState, user: &CurrentUser) -> Result<()> {
    let exists = UserRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .is_some();

    if exists {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "session references a deleted account".to_string(),
        ))
    }
}

/// `GET /api/active-shipment`
///
/// Count of shipments whose most recent tracking update is not `delivered`.
/// Any authenticated session may ask.
#[instrument(skip(state, user))]
pub async fn active_shipment_count(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<DataBody<u64>>> {
    ensure_user_exists(&state, &user).await?;

    let count = ShipmentRepository::new(state.pool()).count_active().await?;

    Ok(Json(DataBody::new(count)))
}

/// `GET /api/shipments`
///
/// All shipments with their tracking history, timestamps as RFC 3339 text,
/// ordered by creation time ascending. Any authenticated session may ask.
#[instrument(skip(state, user))]
pub async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<DataBody<Vec<ShipmentView>>>> {
    ensure_user_exists(&state, &user).await?;

    let views = ShipmentRepository::new(state.pool())
        .list_all()
        .await?
        .iter()
        .map(ShipmentView::from)
        .collect();

    Ok(Json(DataBody::new(views)))
}
