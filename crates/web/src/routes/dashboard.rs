//! Operations dashboard route handlers.
//!
//! Every page here requires the admin role; customers get 403.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::Deserialize;
use tracing::instrument;

use freightline_core::{ShipmentId, TrackingStatus};

use crate::db::{ChatMessageRepository, ShipmentRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{ChatMessageView, CurrentUser};
use crate::state::AppState;

/// Channel the operations console runs on.
pub const OPS_CHANNEL: &str = "presence-ops";

/// Messages of history shown when the console loads.
const CHAT_HISTORY_LIMIT: i64 = 50;

// =============================================================================
// Shipments List
// =============================================================================

/// A shipment row as rendered in the dashboard table.
#[derive(Clone)]
pub struct ShipmentRowView {
    pub id: i32,
    pub reference: String,
    pub route: String,
    pub status: String,
    pub is_active: bool,
    pub update_count: usize,
    pub created_at: String,
    pub estimated_delivery: Option<String>,
}

/// Shipments list template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/shipments.html")]
pub struct ShipmentsTemplate {
    pub current_user: CurrentUser,
    pub active_count: u64,
    pub shipments: Vec<ShipmentRowView>,
    pub statuses: Vec<(&'static str, &'static str)>,
}

/// Display the shipments list.
#[instrument(skip(state, admin))]
pub async fn shipments(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let repo = ShipmentRepository::new(state.pool());
    let active_count = repo.count_active().await?;

    let rows = repo
        .list_all()
        .await?
        .iter()
        .map(|s| ShipmentRowView {
            id: s.id.as_i32(),
            reference: s.reference.clone(),
            route: format!("{} → {}", s.origin, s.destination),
            status: s.latest_status().label().to_string(),
            is_active: s.is_active(),
            update_count: s.updates.len(),
            created_at: s.created_at.format("%d %b %Y").to_string(),
            estimated_delivery: s.estimated_delivery.map(|d| d.format("%d %b %Y").to_string()),
        })
        .collect();

    let statuses = [
        TrackingStatus::Created,
        TrackingStatus::PickedUp,
        TrackingStatus::InTransit,
        TrackingStatus::OutForDelivery,
        TrackingStatus::Delivered,
    ]
    .into_iter()
    .map(|s| (s.as_str(), s.label()))
    .collect();

    Ok(ShipmentsTemplate {
        current_user: admin,
        active_count,
        shipments: rows,
        statuses,
    })
}

/// Form data for creating a shipment.
#[derive(Debug, Deserialize)]
pub struct CreateShipmentForm {
    pub reference: Option<String>,
    pub origin: String,
    pub destination: String,
    /// `YYYY-MM-DD`, empty for no estimate.
    pub estimated_delivery: Option<String>,
}

/// Create a shipment and redirect back to the list.
#[instrument(skip(state, _admin, form))]
pub async fn create_shipment(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<CreateShipmentForm>,
) -> Result<Response> {
    let reference = match form.reference.as_deref().map(str::trim) {
        Some(r) if !r.is_empty() => r.to_uppercase(),
        _ => generate_reference(),
    };

    let estimated_delivery = match form.estimated_delivery.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_estimate(raw)?),
        _ => None,
    };

    ShipmentRepository::new(state.pool())
        .create(&reference, &form.origin, &form.destination, estimated_delivery)
        .await?;

    Ok(Redirect::to("/dashboard").into_response())
}

/// Form data for appending a tracking update.
#[derive(Debug, Deserialize)]
pub struct AppendUpdateForm {
    pub status: String,
    pub location: Option<String>,
}

/// Append a tracking update to a shipment and redirect back to the list.
#[instrument(skip(state, _admin, form))]
pub async fn append_update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(shipment_id): Path<i32>,
    Form(form): Form<AppendUpdateForm>,
) -> Result<Response> {
    let status: TrackingStatus = form
        .status
        .parse()
        .map_err(crate::error::AppError::BadRequest)?;

    ShipmentRepository::new(state.pool())
        .append_update(
            ShipmentId::new(shipment_id),
            status,
            form.location.as_deref().filter(|l| !l.is_empty()),
        )
        .await?;

    Ok(Redirect::to("/dashboard").into_response())
}

/// Generate a reference code like `FL-2026-4821`.
fn generate_reference() -> String {
    use chrono::Datelike;
    let serial: u32 = rand::rng().random_range(0..10_000);
    format!("FL-{}-{serial:04}", Utc::now().year())
}

/// Parse a `YYYY-MM-DD` estimate into an end-of-business-day timestamp.
fn parse_estimate(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| crate::error::AppError::BadRequest(format!("invalid date: {e}")))?;
    let at = date
        .and_hms_opt(17, 0, 0)
        .ok_or_else(|| crate::error::AppError::BadRequest("invalid date".to_string()))?;
    Ok(at.and_utc())
}

// =============================================================================
// Charts
// =============================================================================

/// One bar in a chart, with its width precomputed for the template.
#[derive(Clone)]
pub struct ChartBarView {
    pub label: String,
    pub count: i64,
    pub percent: i64,
}

/// Charts page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/charts.html")]
pub struct ChartsTemplate {
    pub current_user: CurrentUser,
    pub active_count: u64,
    pub status_bars: Vec<ChartBarView>,
    pub monthly_bars: Vec<ChartBarView>,
}

fn to_bars(data: Vec<(String, i64)>) -> Vec<ChartBarView> {
    let max = data.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
    data.into_iter()
        .map(|(label, count)| ChartBarView {
            label,
            count,
            percent: count * 100 / max,
        })
        .collect()
}

/// Display the charts page.
#[instrument(skip(state, admin))]
pub async fn charts(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let repo = ShipmentRepository::new(state.pool());

    let active_count = repo.count_active().await?;
    let status_counts = repo
        .status_counts()
        .await?
        .into_iter()
        .map(|(status, count)| (status.label().to_string(), count))
        .collect();
    let monthly = repo.monthly_created_counts().await?;

    Ok(ChartsTemplate {
        current_user: admin,
        active_count,
        status_bars: to_bars(status_counts),
        monthly_bars: to_bars(monthly),
    })
}

// =============================================================================
// Chat Console
// =============================================================================

/// Chat console template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/chat.html")]
pub struct ChatTemplate {
    pub current_user: CurrentUser,
    /// Provider public key for the browser socket.
    pub realtime_key: String,
    pub realtime_cluster: String,
    pub channel: String,
    pub history: Vec<ChatMessageView>,
}

/// Display the operations chat console.
#[instrument(skip(state, admin))]
pub async fn chat(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let history = ChatMessageRepository::new(state.pool())
        .recent_messages(OPS_CHANNEL, CHAT_HISTORY_LIMIT)
        .await?
        .iter()
        // Sender names are not stored with messages; the console shows ids
        // for anyone who has since left and names for live senders.
        .map(|m| {
            let name = if m.sender_id == admin.id {
                admin.display_name().to_string()
            } else {
                format!("Agent #{}", m.sender_id)
            };
            ChatMessageView::new(m, &name)
        })
        .collect();

    Ok(ChatTemplate {
        current_user: admin,
        realtime_key: state.realtime().key().to_string(),
        realtime_cluster: state.config().realtime.cluster.clone(),
        channel: OPS_CHANNEL.to_string(),
        history,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_reference_shape() {
        let reference = generate_reference();
        let parts: Vec<&str> = reference.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.first().copied(), Some("FL"));
        assert_eq!(parts.get(2).map(|s| s.len()), Some(4));
    }

    #[test]
    fn test_parse_estimate() {
        let at = parse_estimate("2026-03-09").expect("valid date");
        assert_eq!(at.to_rfc3339(), "2026-03-09T17:00:00+00:00");
        assert!(parse_estimate("not-a-date").is_err());
    }

    #[test]
    fn test_to_bars_scales_to_largest() {
        let bars = to_bars(vec![
            ("a".to_string(), 2),
            ("b".to_string(), 4),
            ("c".to_string(), 0),
        ]);
        assert_eq!(bars.iter().map(|b| b.percent).collect::<Vec<_>>(), vec![50, 100, 0]);
    }

    #[test]
    fn test_to_bars_empty_input() {
        assert!(to_bars(vec![]).is_empty());
    }
}
