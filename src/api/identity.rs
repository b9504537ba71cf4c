//! Driver identity extraction.
//!
//! Authentication lives in the fronting auth layer, which resolves the
//! session and injects the caller's driver id as a request header. The
//! gateway never reads ambient session state: the extractor turns the
//! header into an explicit [`DriverId`] parameter and everything below
//! the handlers receives it as a plain argument.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::ids::DriverId;
use crate::error::GatewayError;

/// Header carrying the authenticated driver's id, set by the auth proxy.
pub const DRIVER_ID_HEADER: &str = "x-driver-id";

/// The authenticated driver for the current request.
#[derive(Debug, Clone, Copy)]
pub struct DriverIdentity(pub DriverId);

impl<S> FromRequestParts<S> for DriverIdentity
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(DRIVER_ID_HEADER) else {
            return Err(GatewayError::IdentityMissing);
        };
        let raw = value.to_str().map_err(|_| GatewayError::IdentityMissing)?;
        let uuid = uuid::Uuid::parse_str(raw).map_err(|_| {
            GatewayError::InvalidRequest(format!("malformed {DRIVER_ID_HEADER} header"))
        })?;
        Ok(Self(DriverId::from_uuid(uuid)))
    }
}
