//! Database row models and their domain conversions.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::geofix::GeoFix;
use crate::domain::ids::{DriverId, JourneyId};
use crate::domain::journey::{JourneyLeg, JourneyLog, JourneyStatus};
use crate::domain::proof::ProofPhoto;
use crate::error::GatewayError;

/// A `journey_logs` row as stored, with the legs flattened into nullable
/// columns.
#[derive(Debug, Clone, FromRow)]
pub struct JourneyLogRow {
    /// Row identifier.
    pub id: Uuid,
    /// Owning driver.
    pub driver_id: Uuid,
    /// Calendar date; unique together with `driver_id`.
    pub log_date: NaiveDate,
    /// Status discriminator text.
    pub status: String,
    /// Start leg columns; all present once the journey is started.
    pub start_latitude: Option<f64>,
    /// Start longitude.
    pub start_longitude: Option<f64>,
    /// Start accuracy in meters, when the device reported one.
    pub start_accuracy_m: Option<f64>,
    /// Start capture timestamp.
    pub start_captured_at: Option<DateTime<Utc>>,
    /// Start proof photo, base64.
    pub start_photo: Option<String>,
    /// End leg columns; all present once the journey is completed.
    pub end_latitude: Option<f64>,
    /// End longitude.
    pub end_longitude: Option<f64>,
    /// End accuracy in meters, when the device reported one.
    pub end_accuracy_m: Option<f64>,
    /// End capture timestamp.
    pub end_captured_at: Option<DateTime<Utc>>,
    /// End proof photo, base64.
    pub end_photo: Option<String>,
    /// Derived distance in kilometers.
    pub total_km: Option<f64>,
    /// Supervisor note.
    pub remarks: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Reassembles one leg from its flattened columns.
///
/// Returns `None` when the leg was never recorded. A partially present leg
/// means the row was written outside this service and is reported as a
/// persistence error rather than silently dropped.
fn leg_from_columns(
    latitude: Option<f64>,
    longitude: Option<f64>,
    accuracy_m: Option<f64>,
    captured_at: Option<DateTime<Utc>>,
    photo: Option<String>,
    photo_limit: usize,
) -> Result<Option<JourneyLeg>, GatewayError> {
    match (latitude, longitude, captured_at, photo) {
        (None, None, None, None) => Ok(None),
        (Some(latitude), Some(longitude), Some(captured_at), Some(photo)) => {
            let fix = GeoFix::new(latitude, longitude, accuracy_m, captured_at)
                .map_err(|e| GatewayError::PersistenceError(format!("stored fix invalid: {e}")))?;
            let photo = ProofPhoto::from_encoded(&photo, photo_limit)
                .map_err(|e| GatewayError::PersistenceError(format!("stored photo invalid: {e}")))?;
            Ok(Some(JourneyLeg { fix, photo }))
        }
        _ => Err(GatewayError::PersistenceError(
            "journey leg columns are partially populated".to_string(),
        )),
    }
}

impl JourneyLogRow {
    /// Converts the row into the domain aggregate.
    ///
    /// `photo_limit` bounds re-validation of the stored payloads.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] when the status text or
    /// leg columns are inconsistent with what this service writes.
    pub fn into_domain(self, photo_limit: usize) -> Result<JourneyLog, GatewayError> {
        let status: JourneyStatus = self
            .status
            .parse()
            .map_err(|e| GatewayError::PersistenceError(format!("{e}")))?;
        let start = leg_from_columns(
            self.start_latitude,
            self.start_longitude,
            self.start_accuracy_m,
            self.start_captured_at,
            self.start_photo,
            photo_limit,
        )?;
        let end = leg_from_columns(
            self.end_latitude,
            self.end_longitude,
            self.end_accuracy_m,
            self.end_captured_at,
            self.end_photo,
            photo_limit,
        )?;
        Ok(JourneyLog {
            id: JourneyId::from_uuid(self.id),
            driver_id: DriverId::from_uuid(self.driver_id),
            log_date: self.log_date,
            status,
            start,
            end,
            total_km: self.total_km,
            remarks: self.remarks,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// A driver row joined with its assigned vehicle, as read from the
/// collaborator-owned tables.
#[derive(Debug, Clone, FromRow)]
pub struct DriverRow {
    /// Driver identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Registration number of the assigned vehicle.
    pub vehicle_number: Option<String>,
    /// Vehicle type label.
    pub vehicle_type: Option<String>,
    /// Active flag on the driver record.
    pub is_active: bool,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn base_row() -> JourneyLogRow {
        JourneyLogRow {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            log_date: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap_or_default(),
            status: "IN_PROGRESS".to_string(),
            start_latitude: Some(28.6139),
            start_longitude: Some(77.2090),
            start_accuracy_m: Some(9.0),
            start_captured_at: Some(Utc::now()),
            start_photo: Some(base64_photo()),
            end_latitude: None,
            end_longitude: None,
            end_accuracy_m: None,
            end_captured_at: None,
            end_photo: None,
            total_km: None,
            remarks: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn base64_photo() -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(b"img")
    }

    #[test]
    fn in_progress_row_converts() {
        let Ok(log) = base_row().into_domain(1024) else {
            panic!("well-formed row must convert");
        };
        assert_eq!(log.status, JourneyStatus::InProgress);
        assert!(log.start.is_some());
        assert!(log.end.is_none());
    }

    #[test]
    fn unknown_status_is_a_persistence_error() {
        let mut row = base_row();
        row.status = "ARCHIVED".to_string();
        assert!(matches!(
            row.into_domain(1024),
            Err(GatewayError::PersistenceError(_))
        ));
    }

    #[test]
    fn partial_leg_is_a_persistence_error() {
        let mut row = base_row();
        row.start_photo = None;
        assert!(matches!(
            row.into_domain(1024),
            Err(GatewayError::PersistenceError(_))
        ));
    }
}
