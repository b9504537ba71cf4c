//! Supervisory rollups of journey activity.

use chrono::NaiveDate;
use serde::Serialize;

use super::ids::DriverId;
use super::journey::JourneyStatus;

/// One driver's rollup for a single calendar date.
///
/// A pure projection: journey fields come from the day's [`JourneyLog`]
/// (status `PENDING` and zero kilometers when no row exists) and the
/// driver/vehicle/assignment fields come from collaborator-owned records.
///
/// [`JourneyLog`]: super::journey::JourneyLog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    /// Driver the rollup describes.
    pub driver_id: DriverId,
    /// Driver display name.
    pub driver_name: String,
    /// Driver contact phone, when on record.
    pub driver_phone: Option<String>,
    /// Registration number of the assigned vehicle, if any.
    pub vehicle_number: Option<String>,
    /// Type of the assigned vehicle, if any.
    pub vehicle_type: Option<String>,
    /// Journey status for the date.
    pub status: JourneyStatus,
    /// Kilometers traveled; `0.0` until the journey completes.
    pub total_km: f64,
    /// Number of work assignments scheduled for the date.
    pub assignments_count: u64,
    /// The date summarized.
    pub date: NaiveDate,
    /// Whether the driver record is active.
    pub is_active: bool,
}
