//! Journey log DTOs for the km-log endpoints.
//!
//! Photos are base64 strings inside the JSON body, never multipart, so a
//! whole transition is one self-contained request.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ids::DriverId;
use crate::domain::journey::{JourneyLeg, JourneyLog, JourneyStatus};

/// Request body for `POST /km-log/start`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct StartJourneyRequest {
    /// Latitude of the start fix in degrees.
    pub latitude: f64,
    /// Longitude of the start fix in degrees.
    pub longitude: f64,
    /// Reported accuracy in meters, when the device provided one.
    #[serde(default)]
    pub accuracy_m: Option<f64>,
    /// Device clock at acquisition; defaults to receipt time when absent.
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
    /// Base64 proof photo. Required for the transition to proceed.
    #[serde(default)]
    pub start_photo: Option<String>,
}

/// Request body for `POST /km-log/end`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EndJourneyRequest {
    /// Latitude of the end fix in degrees.
    pub latitude: f64,
    /// Longitude of the end fix in degrees.
    pub longitude: f64,
    /// Reported accuracy in meters, when the device provided one.
    #[serde(default)]
    pub accuracy_m: Option<f64>,
    /// Device clock at acquisition; defaults to receipt time when absent.
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
    /// Base64 proof photo. Required for the transition to proceed.
    #[serde(default)]
    pub end_photo: Option<String>,
}

/// One journey endpoint as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct JourneyLegDto {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Accuracy in meters, when recorded.
    pub accuracy_m: Option<f64>,
    /// Capture timestamp.
    pub captured_at: DateTime<Utc>,
    /// Base64 proof photo.
    pub photo: String,
}

impl From<JourneyLeg> for JourneyLegDto {
    fn from(leg: JourneyLeg) -> Self {
        Self {
            latitude: leg.fix.latitude,
            longitude: leg.fix.longitude,
            accuracy_m: leg.fix.accuracy_m,
            captured_at: leg.fix.captured_at,
            photo: leg.photo.into_inner(),
        }
    }
}

/// A journey log as returned to clients.
///
/// A driver with no row yet gets the `PENDING` representation: no id, no
/// legs, no audit timestamps.
#[derive(Debug, Serialize, ToSchema)]
pub struct JourneyLogDto {
    /// Row identifier; absent for the `PENDING` representation.
    pub id: Option<Uuid>,
    /// Owning driver.
    pub driver_id: Uuid,
    /// Calendar date of the journey.
    pub log_date: NaiveDate,
    /// Lifecycle status: `PENDING`, `IN_PROGRESS`, or `COMPLETED`.
    pub status: String,
    /// Start leg, once the journey is started.
    pub start: Option<JourneyLegDto>,
    /// End leg, once the journey is completed.
    pub end: Option<JourneyLegDto>,
    /// Derived distance in kilometers, once completed.
    pub total_km: Option<f64>,
    /// Supervisor note, if any.
    pub remarks: Option<String>,
    /// Row creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last mutation timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

impl JourneyLogDto {
    /// The representation of "no journey recorded yet today".
    #[must_use]
    pub fn pending(driver_id: DriverId, log_date: NaiveDate) -> Self {
        Self {
            id: None,
            driver_id: *driver_id.as_uuid(),
            log_date,
            status: JourneyStatus::Pending.to_string(),
            start: None,
            end: None,
            total_km: None,
            remarks: None,
            created_at: None,
            updated_at: None,
        }
    }
}

impl From<JourneyLog> for JourneyLogDto {
    fn from(log: JourneyLog) -> Self {
        Self {
            id: Some(*log.id.as_uuid()),
            driver_id: *log.driver_id.as_uuid(),
            log_date: log.log_date,
            status: log.status.to_string(),
            start: log.start.map(JourneyLegDto::from),
            end: log.end.map(JourneyLegDto::from),
            total_km: log.total_km,
            remarks: log.remarks,
            created_at: Some(log.created_at),
            updated_at: Some(log.updated_at),
        }
    }
}
