//! Summary handlers: single-driver and fleet-wide day rollups.

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use chrono::NaiveDate;

use crate::api::dto::{DaySummaryDto, FleetSummaryParams, FleetSummaryResponse};
use crate::api::identity::DriverIdentity;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};
use crate::service::journey_service::current_log_date;

/// `GET /summary/{date}` — The calling driver's rollup for a date.
///
/// # Errors
///
/// Returns [`GatewayError::DriverNotFound`] for an unprovisioned account
/// and [`GatewayError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/summary/{date}",
    tag = "Summary",
    summary = "Daily summary for the calling driver",
    description = "Journey status, derived kilometers, and assignment count for one date. Reads current state on every call.",
    params(
        ("date" = NaiveDate, Path, description = "Date to summarize (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "The driver's day rollup", body = DaySummaryDto),
        (status = 404, description = "Driver record not provisioned", body = ErrorResponse),
    )
)]
pub async fn driver_summary(
    State(state): State<AppState>,
    DriverIdentity(driver_id): DriverIdentity,
    Path(date): Path<NaiveDate>,
) -> Result<impl IntoResponse, GatewayError> {
    let summary = state.summary_service.daily_summary(driver_id, date).await?;
    Ok(Json(DaySummaryDto::from(summary)))
}

/// `GET /all-summary` — Fleet-wide rollup for supervisory views.
///
/// Role gating happens upstream in the auth layer.
///
/// # Errors
///
/// Returns [`GatewayError`] on storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/all-summary",
    tag = "Summary",
    summary = "Fleet-wide daily summary",
    description = "One rollup per driver with activity (a journey log or an assignment) on the target date. Defaults to today.",
    params(FleetSummaryParams),
    responses(
        (status = 200, description = "Rollups for every active driver", body = FleetSummaryResponse),
    )
)]
pub async fn fleet_summary(
    State(state): State<AppState>,
    Query(params): Query<FleetSummaryParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let date = params.target_date.unwrap_or_else(current_log_date);
    let summaries = state.summary_service.fleet_summary(date).await?;

    Ok(Json(FleetSummaryResponse {
        date,
        data: summaries.into_iter().map(DaySummaryDto::from).collect(),
    }))
}

/// Summary routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary/{date}", get(driver_summary))
        .route("/all-summary", get(fleet_summary))
}
