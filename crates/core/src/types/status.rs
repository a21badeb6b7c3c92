//! Tracking status for shipment history entries.

use serde::{Deserialize, Serialize};

/// Status carried by a single tracking update.
///
/// A shipment's delivered/active state is always derived from the most
/// recent update; it is never stored on the shipment row itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "tracking_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    #[default]
    Created,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
}

impl TrackingStatus {
    /// Terminal state: a shipment whose latest update is `Delivered` is no
    /// longer active.
    #[must_use]
    pub const fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Stable snake_case name, matching both the JSON and database forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::PickedUp => "picked_up",
            Self::InTransit => "in_transit",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
        }
    }

    /// Human-readable label for templates.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::PickedUp => "Picked up",
            Self::InTransit => "In transit",
            Self::OutForDelivery => "Out for delivery",
            Self::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TrackingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "picked_up" => Ok(Self::PickedUp),
            "in_transit" => Ok(Self::InTransit),
            "out_for_delivery" => Ok(Self::OutForDelivery),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid tracking status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TrackingStatus; 5] = [
        TrackingStatus::Created,
        TrackingStatus::PickedUp,
        TrackingStatus::InTransit,
        TrackingStatus::OutForDelivery,
        TrackingStatus::Delivered,
    ];

    #[test]
    fn test_only_delivered_is_terminal() {
        for status in ALL {
            assert_eq!(
                status.is_delivered(),
                status == TrackingStatus::Delivered,
                "{status}"
            );
        }
    }

    #[test]
    fn test_as_str_parses_back() {
        for status in ALL {
            let parsed: TrackingStatus = status.as_str().parse().expect("parses back");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_serde_is_snake_case() {
        let json = serde_json::to_string(&TrackingStatus::OutForDelivery).expect("serialize");
        assert_eq!(json, "\"out_for_delivery\"");
    }
}
