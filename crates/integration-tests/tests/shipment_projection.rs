//! Integration tests for shipment projections and the active predicate.

use chrono::{DateTime, TimeZone, Utc};

use freightline_core::{ShipmentId, TrackingStatus, TrackingUpdateId};
use freightline_web::models::{Shipment, ShipmentView, TrackingUpdate};

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, minute, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn update(id: i32, status: TrackingStatus, minute: u32) -> TrackingUpdate {
    TrackingUpdate {
        id: TrackingUpdateId::new(id),
        shipment_id: ShipmentId::new(1),
        status,
        location: None,
        created_at: at(minute),
    }
}

fn shipment(updates: Vec<TrackingUpdate>) -> Shipment {
    Shipment {
        id: ShipmentId::new(1),
        reference: "FL-2026-0042".to_string(),
        origin: "Rotterdam".to_string(),
        destination: "Hamburg".to_string(),
        estimated_delivery: None,
        created_at: at(0),
        updates,
    }
}

// =============================================================================
// Active Predicate (latest-status semantics)
// =============================================================================

#[test]
fn test_created_only_is_active() {
    let s = shipment(vec![update(1, TrackingStatus::Created, 1)]);
    assert!(s.is_active());
}

#[test]
fn test_created_then_delivered_is_not_active() {
    // Latest-status semantics: an earlier non-delivered update does not keep
    // a delivered shipment active
    let s = shipment(vec![
        update(1, TrackingStatus::Created, 1),
        update(2, TrackingStatus::Delivered, 2),
    ]);
    assert!(!s.is_active());
}

#[test]
fn test_delivered_then_reopened_is_active_again() {
    let s = shipment(vec![
        update(1, TrackingStatus::Delivered, 1),
        update(2, TrackingStatus::OutForDelivery, 2),
    ]);
    assert!(s.is_active());
}

#[test]
fn test_no_updates_is_active() {
    assert!(shipment(vec![]).is_active());
}

// =============================================================================
// Wire Projection
// =============================================================================

#[test]
fn test_timestamps_round_trip_at_millisecond_precision() {
    let precise = at(30)
        .checked_add_signed(chrono::Duration::milliseconds(457))
        .expect("in range");

    let mut s = shipment(vec![update(1, TrackingStatus::Created, 1)]);
    s.estimated_delivery = Some(precise);

    let view = ShipmentView::from(&s);

    let estimate = view.estimated_delivery.expect("estimate present");
    let parsed = DateTime::parse_from_rfc3339(&estimate)
        .expect("RFC 3339")
        .to_utc();
    assert_eq!(parsed, precise);

    let created = DateTime::parse_from_rfc3339(&view.created_at)
        .expect("RFC 3339")
        .to_utc();
    assert_eq!(created, s.created_at);
}

#[test]
fn test_view_keeps_update_order_and_latest_status() {
    let s = shipment(vec![
        update(1, TrackingStatus::Created, 1),
        update(2, TrackingStatus::PickedUp, 2),
        update(3, TrackingStatus::InTransit, 3),
    ]);

    let view = ShipmentView::from(&s);
    assert_eq!(view.status, TrackingStatus::InTransit);
    assert_eq!(
        view.updates
            .iter()
            .map(|u| u.status)
            .collect::<Vec<_>>(),
        vec![
            TrackingStatus::Created,
            TrackingStatus::PickedUp,
            TrackingStatus::InTransit
        ]
    );
}

#[test]
fn test_missing_estimate_is_absent_on_the_wire() {
    let view = ShipmentView::from(&shipment(vec![]));
    let json = serde_json::to_value(&view).expect("serializes");
    assert!(json.get("estimated_delivery").is_none());
    assert_eq!(json["status"], "created");
}
