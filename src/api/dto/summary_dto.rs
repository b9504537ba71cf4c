//! Summary DTOs for the supervisory endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::summary::DaySummary;

/// One driver's day rollup as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct DaySummaryDto {
    /// Driver identifier.
    pub driver_id: Uuid,
    /// Driver display name.
    pub driver_name: String,
    /// Driver contact phone, when on record.
    pub driver_phone: Option<String>,
    /// Assigned vehicle registration number, if any.
    pub vehicle_number: Option<String>,
    /// Assigned vehicle type, if any.
    pub vehicle_type: Option<String>,
    /// Journey status for the date.
    pub status: String,
    /// Kilometers traveled; zero until the journey completes.
    pub total_km: f64,
    /// Active assignments scheduled for the date.
    pub assignments_count: u64,
    /// The date summarized.
    pub date: NaiveDate,
    /// Whether the driver record is active.
    pub is_active: bool,
}

impl From<DaySummary> for DaySummaryDto {
    fn from(summary: DaySummary) -> Self {
        Self {
            driver_id: *summary.driver_id.as_uuid(),
            driver_name: summary.driver_name,
            driver_phone: summary.driver_phone,
            vehicle_number: summary.vehicle_number,
            vehicle_type: summary.vehicle_type,
            status: summary.status.to_string(),
            total_km: summary.total_km,
            assignments_count: summary.assignments_count,
            date: summary.date,
            is_active: summary.is_active,
        }
    }
}

/// Response body for `GET /all-summary`.
#[derive(Debug, Serialize, ToSchema)]
pub struct FleetSummaryResponse {
    /// The date summarized.
    pub date: NaiveDate,
    /// One rollup per driver with activity on the date.
    pub data: Vec<DaySummaryDto>,
}

/// Query parameters for `GET /all-summary`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct FleetSummaryParams {
    /// Date to summarize. Defaults to today.
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}
