//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Capture-layer errors ([`GpsError`], [`PhotoError`]) are resolved before
//! any transition request is sent; what reaches this type is the server-side
//! taxonomy.
//!
//! [`GpsError`]: crate::capture::GpsError
//! [`PhotoError`]: crate::domain::proof::PhotoError

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::geofix::CoordinateRangeError;
use crate::domain::ids::DriverId;
use crate::domain::proof::PhotoError;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "journey conflict: already started for 2026-08-05",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 500 Internal Server Error    |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Proof photo missing, oversized, or undecodable.
    #[error("invalid photo: {0}")]
    InvalidPhoto(#[from] PhotoError),

    /// Submitted coordinates fall outside the valid ranges.
    #[error("invalid fix: {0}")]
    InvalidCoordinates(#[from] CoordinateRangeError),

    /// Transition attempted against a log in the wrong state, or a lost
    /// race with a concurrent transition. Safe to refresh and re-read.
    #[error("journey conflict: {0}")]
    JourneyConflict(String),

    /// No driver record for the identity presented; an account
    /// provisioning gap to be resolved by an administrator.
    #[error("driver not found: {0}; contact an administrator")]
    DriverNotFound(DriverId),

    /// The request carried no usable driver identity header.
    #[error("missing driver identity")]
    IdentityMissing,

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidPhoto(_) => 1002,
            Self::InvalidCoordinates(_) => 1003,
            Self::IdentityMissing => 1004,
            Self::JourneyConflict(_) => 2001,
            Self::DriverNotFound(_) => 2002,
            Self::PersistenceError(_) => 3001,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidPhoto(_) | Self::InvalidCoordinates(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::IdentityMissing => StatusCode::UNAUTHORIZED,
            Self::JourneyConflict(_) => StatusCode::CONFLICT,
            Self::DriverNotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn conflict_maps_to_409() {
        let err = GatewayError::JourneyConflict("already started".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), 2001);
    }

    #[test]
    fn missing_driver_maps_to_404() {
        let err = GatewayError::DriverNotFound(DriverId::new());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn photo_and_coordinate_failures_are_bad_requests() {
        let photo: GatewayError = PhotoError::Missing.into();
        assert_eq!(photo.status_code(), StatusCode::BAD_REQUEST);

        let coords: GatewayError = CoordinateRangeError {
            latitude: 91.0,
            longitude: 0.0,
        }
        .into();
        assert_eq!(coords.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(coords.error_code(), 1003);
    }
}
