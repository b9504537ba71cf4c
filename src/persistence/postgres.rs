//! PostgreSQL implementation of the journey store and driver directory.
//!
//! The one-journey-per-driver-per-day invariant is enforced by the
//! database itself: `insert_started` relies on the
//! `UNIQUE (driver_id, log_date)` constraint via `ON CONFLICT DO NOTHING`,
//! and `complete_in_progress` is an `UPDATE` guarded on
//! `status = 'IN_PROGRESS'`. Concurrent submissions therefore resolve to
//! one winner inside the database, with no application-level locking.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::directory::{DriverDirectory, DriverRecord};
use super::models::{DriverRow, JourneyLogRow};
use super::store::JourneyStore;
use crate::domain::ids::DriverId;
use crate::domain::journey::{JourneyLeg, JourneyLog, JourneyStatus};
use crate::error::GatewayError;

/// Column list shared by every query returning a full journey row.
const JOURNEY_COLUMNS: &str = "id, driver_id, log_date, status, \
     start_latitude, start_longitude, start_accuracy_m, start_captured_at, start_photo, \
     end_latitude, end_longitude, end_accuracy_m, end_captured_at, end_photo, \
     total_km, remarks, created_at, updated_at";

/// PostgreSQL-backed journey store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresJourneyStore {
    pool: PgPool,
    photo_limit: usize,
}

impl PostgresJourneyStore {
    /// Creates a new store on the given connection pool.
    ///
    /// `photo_limit` bounds re-validation of photo payloads read back
    /// from storage.
    #[must_use]
    pub fn new(pool: PgPool, photo_limit: usize) -> Self {
        Self { pool, photo_limit }
    }
}

impl JourneyStore for PostgresJourneyStore {
    async fn find(
        &self,
        driver_id: DriverId,
        log_date: NaiveDate,
    ) -> Result<Option<JourneyLog>, GatewayError> {
        let sql = format!(
            "SELECT {JOURNEY_COLUMNS} FROM journey_logs WHERE driver_id = $1 AND log_date = $2"
        );
        let row = sqlx::query_as::<_, JourneyLogRow>(&sql)
            .bind(driver_id.as_uuid())
            .bind(log_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        row.map(|r| r.into_domain(self.photo_limit)).transpose()
    }

    async fn insert_started(
        &self,
        driver_id: DriverId,
        log_date: NaiveDate,
        start: JourneyLeg,
    ) -> Result<Option<JourneyLog>, GatewayError> {
        let sql = format!(
            "INSERT INTO journey_logs \
                 (driver_id, log_date, status, start_latitude, start_longitude, \
                  start_accuracy_m, start_captured_at, start_photo) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (driver_id, log_date) DO NOTHING \
             RETURNING {JOURNEY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JourneyLogRow>(&sql)
            .bind(driver_id.as_uuid())
            .bind(log_date)
            .bind(JourneyStatus::InProgress.to_string())
            .bind(start.fix.latitude)
            .bind(start.fix.longitude)
            .bind(start.fix.accuracy_m)
            .bind(start.fix.captured_at)
            .bind(start.photo.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        row.map(|r| r.into_domain(self.photo_limit)).transpose()
    }

    async fn complete_in_progress(
        &self,
        driver_id: DriverId,
        log_date: NaiveDate,
        end: JourneyLeg,
        total_km: f64,
    ) -> Result<Option<JourneyLog>, GatewayError> {
        let sql = format!(
            "UPDATE journey_logs SET \
                 status = $3, end_latitude = $4, end_longitude = $5, \
                 end_accuracy_m = $6, end_captured_at = $7, end_photo = $8, \
                 total_km = $9, updated_at = now() \
             WHERE driver_id = $1 AND log_date = $2 AND status = $10 \
             RETURNING {JOURNEY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JourneyLogRow>(&sql)
            .bind(driver_id.as_uuid())
            .bind(log_date)
            .bind(JourneyStatus::Completed.to_string())
            .bind(end.fix.latitude)
            .bind(end.fix.longitude)
            .bind(end.fix.accuracy_m)
            .bind(end.fix.captured_at)
            .bind(end.photo.as_str())
            .bind(total_km)
            .bind(JourneyStatus::InProgress.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        row.map(|r| r.into_domain(self.photo_limit)).transpose()
    }

    async fn logs_on(&self, log_date: NaiveDate) -> Result<Vec<JourneyLog>, GatewayError> {
        let sql = format!(
            "SELECT {JOURNEY_COLUMNS} FROM journey_logs \
             WHERE log_date = $1 ORDER BY driver_id"
        );
        let rows = sqlx::query_as::<_, JourneyLogRow>(&sql)
            .bind(log_date)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        rows.into_iter()
            .map(|r| r.into_domain(self.photo_limit))
            .collect()
    }
}

/// Read-only view over the fleet service's `drivers`, `vehicles`, and
/// `driver_assignments` tables.
///
/// Those tables are owned and migrated by the fleet administration
/// service; this gateway only ever selects from them.
#[derive(Debug, Clone)]
pub struct PostgresDriverDirectory {
    pool: PgPool,
}

impl PostgresDriverDirectory {
    /// Creates a new directory on the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl DriverDirectory for PostgresDriverDirectory {
    async fn driver(&self, driver_id: DriverId) -> Result<Option<DriverRecord>, GatewayError> {
        let row = sqlx::query_as::<_, DriverRow>(
            "SELECT d.id, d.name, d.phone, v.vehicle_number, v.vehicle_type, d.is_active \
             FROM drivers d LEFT JOIN vehicles v ON v.id = d.vehicle_id \
             WHERE d.id = $1",
        )
        .bind(driver_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(row.map(|r| DriverRecord {
            id: DriverId::from_uuid(r.id),
            name: r.name,
            phone: r.phone,
            vehicle_number: r.vehicle_number,
            vehicle_type: r.vehicle_type,
            is_active: r.is_active,
        }))
    }

    async fn assignments_count(
        &self,
        driver_id: DriverId,
        date: NaiveDate,
    ) -> Result<u64, GatewayError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM driver_assignments \
             WHERE driver_id = $1 AND assignment_date = $2 AND is_active",
        )
        .bind(driver_id.as_uuid())
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn drivers_with_assignments_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<DriverId>, GatewayError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT DISTINCT driver_id FROM driver_assignments \
             WHERE assignment_date = $1 AND is_active",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(ids.into_iter().map(DriverId::from_uuid).collect())
    }
}
