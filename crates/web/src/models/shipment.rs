//! Shipment models and API view types.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use freightline_core::{ShipmentId, TrackingStatus, TrackingUpdateId};

/// A shipment with its full tracking history.
#[derive(Debug, Clone)]
pub struct Shipment {
    pub id: ShipmentId,
    /// Public reference code shown to customers (e.g. `FL-2026-0042`).
    pub reference: String,
    pub origin: String,
    pub destination: String,
    pub estimated_delivery: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Oldest first. Creation order is chronological order.
    pub updates: Vec<TrackingUpdate>,
}

impl Shipment {
    /// The most recent tracking status, or `Created` for a shipment whose
    /// history is still empty.
    #[must_use]
    pub fn latest_status(&self) -> TrackingStatus {
        self.updates
            .last()
            .map_or(TrackingStatus::Created, |u| u.status)
    }

    /// A shipment is active until its latest update says `delivered`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.latest_status().is_delivered()
    }
}

/// A single entry in a shipment's history.
#[derive(Debug, Clone)]
pub struct TrackingUpdate {
    pub id: TrackingUpdateId,
    pub shipment_id: ShipmentId,
    pub status: TrackingStatus,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// API Views
// =============================================================================

/// Serialize a timestamp as RFC 3339 with millisecond precision.
///
/// Milliseconds are the precision contract for API consumers: re-parsing the
/// string yields a timestamp equal to the stored value at that granularity.
fn to_transport_string(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Shipment as rendered on the `/api/shipments` wire.
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentView {
    pub id: ShipmentId,
    pub reference: String,
    pub origin: String,
    pub destination: String,
    /// Absent (not an empty string) when no estimate is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<String>,
    pub created_at: String,
    pub status: TrackingStatus,
    pub updates: Vec<TrackingUpdateView>,
}

/// Tracking update as rendered on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct TrackingUpdateView {
    pub id: TrackingUpdateId,
    pub status: TrackingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub created_at: String,
}

impl From<&TrackingUpdate> for TrackingUpdateView {
    fn from(update: &TrackingUpdate) -> Self {
        Self {
            id: update.id,
            status: update.status,
            location: update.location.clone(),
            created_at: to_transport_string(update.created_at),
        }
    }
}

impl From<&Shipment> for ShipmentView {
    fn from(shipment: &Shipment) -> Self {
        Self {
            id: shipment.id,
            reference: shipment.reference.clone(),
            origin: shipment.origin.clone(),
            destination: shipment.destination.clone(),
            estimated_delivery: shipment.estimated_delivery.map(to_transport_string),
            created_at: to_transport_string(shipment.created_at),
            status: shipment.latest_status(),
            updates: shipment.updates.iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn update(id: i32, status: TrackingStatus, at: DateTime<Utc>) -> TrackingUpdate {
        TrackingUpdate {
            id: TrackingUpdateId::new(id),
            shipment_id: ShipmentId::new(1),
            status,
            location: None,
            created_at: at,
        }
    }

    fn shipment(updates: Vec<TrackingUpdate>) -> Shipment {
        Shipment {
            id: ShipmentId::new(1),
            reference: "FL-2026-0001".to_string(),
            origin: "Rotterdam".to_string(),
            destination: "Hamburg".to_string(),
            estimated_delivery: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
            updates,
        }
    }

    #[test]
    fn test_latest_status_is_last_entry() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let s = shipment(vec![
            update(1, TrackingStatus::Created, at),
            update(2, TrackingStatus::InTransit, at),
        ]);
        assert_eq!(s.latest_status(), TrackingStatus::InTransit);
        assert!(s.is_active());
    }

    #[test]
    fn test_delivered_latest_means_inactive() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        let s = shipment(vec![
            update(1, TrackingStatus::Created, at),
            update(2, TrackingStatus::Delivered, at),
        ]);
        assert!(!s.is_active());
    }

    #[test]
    fn test_empty_history_is_active() {
        let s = shipment(vec![]);
        assert_eq!(s.latest_status(), TrackingStatus::Created);
        assert!(s.is_active());
    }

    #[test]
    fn test_transport_string_round_trips_to_millis() {
        let at = Utc
            .with_ymd_and_hms(2026, 3, 1, 8, 30, 15)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(123))
            .unwrap();

        let text = to_transport_string(at);
        let parsed = DateTime::parse_from_rfc3339(&text).unwrap().to_utc();
        assert_eq!(parsed, at);
    }

    #[test]
    fn test_view_omits_missing_estimate() {
        let s = shipment(vec![]);
        let view = ShipmentView::from(&s);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("estimated_delivery").is_none());
        assert_eq!(json["reference"], "FL-2026-0001");
    }

    #[test]
    fn test_view_carries_estimate_when_set() {
        let mut s = shipment(vec![]);
        s.estimated_delivery = Some(Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap());
        let view = ShipmentView::from(&s);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["estimated_delivery"], "2026-03-09T12:00:00.000Z");
    }
}
