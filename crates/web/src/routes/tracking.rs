//! Public shipment tracking routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::db::ShipmentRepository;
use crate::state::AppState;

/// A tracking-history row as rendered on the page.
#[derive(Clone)]
pub struct HistoryRowView {
    pub status: String,
    pub location: Option<String>,
    pub at: String,
}

/// Shipment summary as rendered on the tracking result page.
#[derive(Clone)]
pub struct TrackedShipmentView {
    pub reference: String,
    pub origin: String,
    pub destination: String,
    pub status: String,
    pub is_delivered: bool,
    pub estimated_delivery: Option<String>,
    pub history: Vec<HistoryRowView>,
}

/// Tracking lookup page template.
#[derive(Template, WebTemplate)]
#[template(path = "tracking.html")]
pub struct TrackingTemplate {
    pub current_user: Option<CurrentUser>,
    /// Set after a lookup; `None` renders the bare form.
    pub shipment: Option<TrackedShipmentView>,
    /// Reference that produced no result.
    pub not_found: Option<String>,
}

/// Display the tracking lookup form.
pub async fn index(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    TrackingTemplate {
        current_user,
        shipment: None,
        not_found: None,
    }
}

/// Query parameters for the lookup form.
#[derive(Debug, serde::Deserialize)]
pub struct LookupQuery {
    pub reference: String,
}

/// Redirect the lookup form to the canonical tracking URL.
pub async fn lookup(
    axum::extract::Query(query): axum::extract::Query<LookupQuery>,
) -> axum::response::Redirect {
    let reference = query.reference.trim().to_uppercase();
    axum::response::Redirect::to(&format!("/tracking/{reference}"))
}

/// Look up a shipment by its public reference code.
#[instrument(skip(state, current_user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Path(reference): Path<String>,
) -> Result<impl IntoResponse> {
    let reference = reference.trim().to_uppercase();
    let shipment = ShipmentRepository::new(state.pool())
        .get_by_reference(&reference)
        .await?;

    let Some(shipment) = shipment else {
        return Ok(TrackingTemplate {
            current_user,
            shipment: None,
            not_found: Some(reference),
        });
    };

    let history = shipment
        .updates
        .iter()
        .map(|u| HistoryRowView {
            status: u.status.label().to_string(),
            location: u.location.clone(),
            at: u.created_at.format("%d %b %Y, %H:%M UTC").to_string(),
        })
        .collect();

    let view = TrackedShipmentView {
        reference: shipment.reference.clone(),
        origin: shipment.origin.clone(),
        destination: shipment.destination.clone(),
        status: shipment.latest_status().label().to_string(),
        is_delivered: !shipment.is_active(),
        estimated_delivery: shipment
            .estimated_delivery
            .map(|d| d.format("%d %b %Y").to_string()),
        history,
    };

    Ok(TrackingTemplate {
        current_user,
        shipment: Some(view),
        not_found: None,
    })
}
