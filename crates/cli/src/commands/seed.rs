//! Demo data seeding command.

use chrono::{Datelike, Duration, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use freightline_core::TrackingStatus;
use freightline_web::db::ShipmentRepository;

use super::{CommandError, connect};

const PORTS: &[&str] = &[
    "Rotterdam",
    "Hamburg",
    "Singapore",
    "Shanghai",
    "Felixstowe",
    "Antwerp",
    "Gdansk",
    "Valencia",
    "Piraeus",
    "Busan",
];

/// Tracking progressions a seeded shipment can be at.
const PROGRESSIONS: &[&[TrackingStatus]] = &[
    &[TrackingStatus::Created],
    &[TrackingStatus::Created, TrackingStatus::PickedUp],
    &[
        TrackingStatus::Created,
        TrackingStatus::PickedUp,
        TrackingStatus::InTransit,
    ],
    &[
        TrackingStatus::Created,
        TrackingStatus::PickedUp,
        TrackingStatus::InTransit,
        TrackingStatus::OutForDelivery,
    ],
    &[
        TrackingStatus::Created,
        TrackingStatus::PickedUp,
        TrackingStatus::InTransit,
        TrackingStatus::OutForDelivery,
        TrackingStatus::Delivered,
    ],
];

/// Seed the database with demo shipments.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run(count: u32) -> Result<(), CommandError> {
    let pool = connect().await?;
    let repo = ShipmentRepository::new(&pool);

    let mut rng = rand::rng();
    let year = Utc::now().year();

    for serial in 0..count {
        let origin = *PORTS.choose(&mut rng).unwrap_or(&"Rotterdam");
        let candidates: Vec<&str> = PORTS.iter().copied().filter(|p| *p != origin).collect();
        let destination = *candidates.choose(&mut rng).unwrap_or(&"Hamburg");

        let reference = format!("FL-{year}-{:04}", 9000 + serial);
        let estimate = rng
            .random_bool(0.7)
            .then(|| Utc::now() + Duration::days(rng.random_range(3..30)));

        let shipment = repo
            .create(&reference, origin, destination, estimate)
            .await?;

        // create() already wrote the initial `created` update
        let progression = PROGRESSIONS
            .choose(&mut rng)
            .copied()
            .unwrap_or(&[TrackingStatus::Created]);
        for status in progression.iter().skip(1) {
            let location = PORTS.choose(&mut rng).copied();
            repo.append_update(shipment.id, *status, location).await?;
        }

        tracing::info!("Seeded {reference}: {origin} -> {destination}");
    }

    tracing::info!("Seeded {count} shipments");
    Ok(())
}
