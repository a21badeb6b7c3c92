//! Shipment and tracking-update repository.
//!
//! Tracking updates are append-only; a shipment's active/delivered state is
//! always derived from its most recent update.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use freightline_core::{ShipmentId, TrackingStatus, TrackingUpdateId};

use super::RepositoryError;
use crate::models::shipment::{Shipment, TrackingUpdate};

/// Internal row type for shipment queries.
#[derive(Debug, sqlx::FromRow)]
struct ShipmentRow {
    id: i32,
    reference: String,
    origin: String,
    destination: String,
    estimated_delivery: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl ShipmentRow {
    fn into_shipment(self, updates: Vec<TrackingUpdate>) -> Shipment {
        Shipment {
            id: ShipmentId::new(self.id),
            reference: self.reference,
            origin: self.origin,
            destination: self.destination,
            estimated_delivery: self.estimated_delivery,
            created_at: self.created_at,
            updates,
        }
    }
}

/// Internal row type for tracking-update queries.
#[derive(Debug, sqlx::FromRow)]
struct TrackingUpdateRow {
    id: i32,
    shipment_id: i32,
    status: TrackingStatus,
    location: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<TrackingUpdateRow> for TrackingUpdate {
    fn from(row: TrackingUpdateRow) -> Self {
        Self {
            id: TrackingUpdateId::new(row.id),
            shipment_id: ShipmentId::new(row.shipment_id),
            status: row.status,
            location: row.location,
            created_at: row.created_at,
        }
    }
}

/// Repository for shipment database operations.
pub struct ShipmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ShipmentRepository<'a> {
    /// Create a new shipment repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all shipments with their full tracking history.
    ///
    /// Shipments are ordered by creation time ascending (id as tiebreak);
    /// updates within a shipment are ordered oldest first. The ordering is
    /// part of the API contract for `/api/shipments`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_all(&self) -> Result<Vec<Shipment>, RepositoryError> {
        let shipment_rows = sqlx::query_as::<_, ShipmentRow>(
            "SELECT id, reference, origin, destination, estimated_delivery, created_at
             FROM shipments
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        let update_rows = sqlx::query_as::<_, TrackingUpdateRow>(
            "SELECT id, shipment_id, status, location, created_at
             FROM tracking_updates
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        let mut by_shipment: HashMap<i32, Vec<TrackingUpdate>> = HashMap::new();
        for row in update_rows {
            by_shipment
                .entry(row.shipment_id)
                .or_default()
                .push(row.into());
        }

        Ok(shipment_rows
            .into_iter()
            .map(|row| {
                let updates = by_shipment.remove(&row.id).unwrap_or_default();
                row.into_shipment(updates)
            })
            .collect())
    }

    /// Count shipments whose most recent tracking update is not `delivered`.
    ///
    /// A shipment with no updates yet counts as active.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_active(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*)
             FROM shipments s
             WHERE COALESCE((
                 SELECT t.status::text
                 FROM tracking_updates t
                 WHERE t.shipment_id = s.id
                 ORDER BY t.created_at DESC, t.id DESC
                 LIMIT 1
             ), 'created') <> 'delivered'",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count.unsigned_abs())
    }

    /// Find a shipment by its public reference code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Shipment>, RepositoryError> {
        let row = sqlx::query_as::<_, ShipmentRow>(
            "SELECT id, reference, origin, destination, estimated_delivery, created_at
             FROM shipments WHERE reference = $1",
        )
        .bind(reference)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let updates = sqlx::query_as::<_, TrackingUpdateRow>(
            "SELECT id, shipment_id, status, location, created_at
             FROM tracking_updates
             WHERE shipment_id = $1
             ORDER BY created_at ASC, id ASC",
        )
        .bind(row.id)
        .fetch_all(self.pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

        Ok(Some(row.into_shipment(updates)))
    }

    /// Create a new shipment with an initial `created` tracking update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the reference code is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        reference: &str,
        origin: &str,
        destination: &str,
        estimated_delivery: Option<DateTime<Utc>>,
    ) -> Result<Shipment, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ShipmentRow>(
            "INSERT INTO shipments (reference, origin, destination, estimated_delivery)
             VALUES ($1, $2, $3, $4)
             RETURNING id, reference, origin, destination, estimated_delivery, created_at",
        )
        .bind(reference)
        .bind(origin)
        .bind(destination)
        .bind(estimated_delivery)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("reference code already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        let first_update = sqlx::query_as::<_, TrackingUpdateRow>(
            "INSERT INTO tracking_updates (shipment_id, status, location)
             VALUES ($1, $2, $3)
             RETURNING id, shipment_id, status, location, created_at",
        )
        .bind(row.id)
        .bind(TrackingStatus::Created)
        .bind(Option::<&str>::None)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_shipment(vec![first_update.into()]))
    }

    /// Append a tracking update to a shipment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the shipment doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn append_update(
        &self,
        shipment_id: ShipmentId,
        status: TrackingStatus,
        location: Option<&str>,
    ) -> Result<TrackingUpdate, RepositoryError> {
        let row = sqlx::query_as::<_, TrackingUpdateRow>(
            "INSERT INTO tracking_updates (shipment_id, status, location)
             VALUES ($1, $2, $3)
             RETURNING id, shipment_id, status, location, created_at",
        )
        .bind(shipment_id.as_i32())
        .bind(status)
        .bind(location)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Per-status counts across all tracking updates (for the charts page).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn status_counts(&self) -> Result<Vec<(TrackingStatus, i64)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct StatusCountRow {
            status: TrackingStatus,
            count: i64,
        }

        let rows = sqlx::query_as::<_, StatusCountRow>(
            "SELECT status, COUNT(*) AS count
             FROM tracking_updates
             GROUP BY status
             ORDER BY status",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| (r.status, r.count)).collect())
    }

    /// Shipments created per calendar month, oldest month first (charts page).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn monthly_created_counts(&self) -> Result<Vec<(String, i64)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct MonthCountRow {
            month: String,
            count: i64,
        }

        let rows = sqlx::query_as::<_, MonthCountRow>(
            "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month,
                    COUNT(*) AS count
             FROM shipments
             GROUP BY 1
             ORDER BY 1",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| (r.month, r.count)).collect())
    }
}
