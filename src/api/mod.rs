//! REST API layer: route handlers, DTOs, and router composition.
//!
//! All journey endpoints are mounted under `/api/v1`; system endpoints
//! live at the root.

pub mod dto;
pub mod handlers;
pub mod identity;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// OpenAPI document covering every endpoint the router mounts.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        handlers::journey::today_log,
        handlers::journey::start_journey,
        handlers::journey::end_journey,
        handlers::summary::driver_summary,
        handlers::summary::fleet_summary,
        handlers::system::health_handler,
    ),
    tags(
        (name = "KM Log", description = "GPS-verified journey start/end tracking"),
        (name = "Summary", description = "Supervisory day and fleet rollups"),
        (name = "System", description = "Health and service metadata")
    )
)]
pub struct ApiDoc;
