//! KM log handlers: today's status, start journey, end journey.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};

use crate::api::dto::{EndJourneyRequest, JourneyLogDto, StartJourneyRequest};
use crate::api::identity::DriverIdentity;
use crate::app_state::AppState;
use crate::domain::geofix::GeoFix;
use crate::domain::proof::{PhotoError, ProofPhoto};
use crate::error::{ErrorResponse, GatewayError};
use crate::service::journey_service::current_log_date;

/// `GET /km-log/today` — Today's journey log for the calling driver.
///
/// # Errors
///
/// Returns [`GatewayError`] when the identity header is missing or on
/// storage failure.
#[utoipa::path(
    get,
    path = "/api/v1/km-log/today",
    tag = "KM Log",
    summary = "Get today's journey log",
    description = "Returns the calling driver's journey log for today, or a PENDING representation when nothing has been recorded yet. Pure read: never creates a row.",
    responses(
        (status = 200, description = "Today's log or its PENDING representation", body = JourneyLogDto),
        (status = 401, description = "Missing driver identity", body = ErrorResponse),
    )
)]
pub async fn today_log(
    State(state): State<AppState>,
    DriverIdentity(driver_id): DriverIdentity,
) -> Result<impl IntoResponse, GatewayError> {
    let log = state.journey_service.today_log(driver_id).await?;
    let dto = log.map_or_else(
        || JourneyLogDto::pending(driver_id, current_log_date()),
        JourneyLogDto::from,
    );
    Ok(Json(dto))
}

/// `POST /km-log/start` — Open today's journey with a GPS fix and proof
/// photo.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid fix or photo, or when today's
/// journey was already started.
#[utoipa::path(
    post,
    path = "/api/v1/km-log/start",
    tag = "KM Log",
    summary = "Start today's journey",
    description = "Records the start fix and proof photo and advances the day's log to IN_PROGRESS. Exactly one journey may be started per driver per day; a duplicate or concurrent attempt receives a conflict.",
    request_body = StartJourneyRequest,
    responses(
        (status = 201, description = "Journey started", body = JourneyLogDto),
        (status = 400, description = "Invalid fix or photo", body = ErrorResponse),
        (status = 409, description = "Journey already started today", body = ErrorResponse),
    )
)]
pub async fn start_journey(
    State(state): State<AppState>,
    DriverIdentity(driver_id): DriverIdentity,
    Json(req): Json<StartJourneyRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let fix = build_fix(req.latitude, req.longitude, req.accuracy_m, req.captured_at)?;
    let photo = require_photo(req.start_photo.as_deref(), state.photo_max_bytes)?;

    let log = state
        .journey_service
        .start_journey(driver_id, fix, photo)
        .await?;

    Ok((StatusCode::CREATED, Json(JourneyLogDto::from(log))))
}

/// `POST /km-log/end` — Close today's journey, deriving the distance.
///
/// # Errors
///
/// Returns [`GatewayError`] on invalid fix or photo, or when today's log
/// is not exactly in progress.
#[utoipa::path(
    post,
    path = "/api/v1/km-log/end",
    tag = "KM Log",
    summary = "End today's journey",
    description = "Records the end fix and proof photo, derives the great-circle distance between the two fixes, and advances the log to COMPLETED. The distance is always computed server-side.",
    request_body = EndJourneyRequest,
    responses(
        (status = 200, description = "Journey completed with derived distance", body = JourneyLogDto),
        (status = 400, description = "Invalid fix or photo, or end predates start", body = ErrorResponse),
        (status = 409, description = "No journey in progress today", body = ErrorResponse),
    )
)]
pub async fn end_journey(
    State(state): State<AppState>,
    DriverIdentity(driver_id): DriverIdentity,
    Json(req): Json<EndJourneyRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let fix = build_fix(req.latitude, req.longitude, req.accuracy_m, req.captured_at)?;
    let photo = require_photo(req.end_photo.as_deref(), state.photo_max_bytes)?;

    let log = state
        .journey_service
        .end_journey(driver_id, fix, photo)
        .await?;

    Ok(Json(JourneyLogDto::from(log)))
}

/// KM log routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/km-log/today", get(today_log))
        .route("/km-log/start", post(start_journey))
        .route("/km-log/end", post(end_journey))
}

/// Range-checks the submitted coordinates, defaulting the capture time to
/// receipt time when the client omitted it.
fn build_fix(
    latitude: f64,
    longitude: f64,
    accuracy_m: Option<f64>,
    captured_at: Option<DateTime<Utc>>,
) -> Result<GeoFix, GatewayError> {
    let captured_at = captured_at.unwrap_or_else(Utc::now);
    GeoFix::new(latitude, longitude, accuracy_m, captured_at).map_err(GatewayError::from)
}

/// Re-validates the inbound photo payload; absence blocks the transition.
fn require_photo(encoded: Option<&str>, limit: usize) -> Result<ProofPhoto, GatewayError> {
    let Some(encoded) = encoded else {
        return Err(GatewayError::InvalidPhoto(PhotoError::Missing));
    };
    ProofPhoto::from_encoded(encoded, limit).map_err(GatewayError::from)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn build_fix_rejects_out_of_range_input() {
        let result = build_fix(91.0, 0.0, None, None);
        assert!(matches!(result, Err(GatewayError::InvalidCoordinates(_))));
    }

    #[test]
    fn build_fix_defaults_capture_time_to_now() {
        let Ok(fix) = build_fix(28.6139, 77.2090, Some(5.0), None) else {
            panic!("in-range fix must build");
        };
        assert!((Utc::now() - fix.captured_at).num_seconds() < 5);
    }

    #[test]
    fn absent_photo_blocks_the_transition() {
        let result = require_photo(None, 1024);
        assert!(matches!(
            result,
            Err(GatewayError::InvalidPhoto(PhotoError::Missing))
        ));
    }
}
