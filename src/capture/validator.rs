//! Two-attempt location capture with freshness tiers.
//!
//! [`capture_fix`] requests a high-accuracy fix first and, only when that
//! attempt times out, retries once on the coarse tier with a longer wait.
//! Each tier applies its own staleness threshold: receivers on some
//! devices answer near-instantly with a cached last-known position, and
//! rejecting by age forces a live re-read so a driver cannot reuse an old
//! location as a start or end point.

use std::time::Duration;

use chrono::Utc;

use crate::domain::geofix::{CoordinateRangeError, GeoFix};

use super::source::{AccuracyTier, FixRequest, LocationSource, SourceError};

/// Everything that can go wrong while acquiring a validated fix.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GpsError {
    /// No location facility on this device.
    #[error("location capture is not supported on this device")]
    Unsupported,
    /// The device denied the location permission.
    #[error("location permission denied; enable location access and retry")]
    PermissionDenied,
    /// The facility could not produce a position.
    #[error("position unavailable; move to open sky and retry")]
    PositionUnavailable,
    /// Both the primary and fallback waits elapsed.
    #[error("location request timed out; retry in a moment")]
    Timeout,
    /// The reading was older than the tier's staleness threshold.
    #[error("location reading is stale ({age_ms} ms old, max {max_age_ms} ms); retry for a live fix")]
    Stale {
        /// Observed age of the reading in milliseconds.
        age_ms: i64,
        /// Threshold it was checked against in milliseconds.
        max_age_ms: i64,
    },
    /// The reading carried out-of-range coordinates.
    #[error(transparent)]
    OutOfRange(#[from] CoordinateRangeError),
}

/// What the captured fix will be used for. Carried for logging only; the
/// policy is identical for both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixPurpose {
    /// Fix opens the day's journey.
    Start,
    /// Fix closes the day's journey.
    End,
}

/// Timeouts and staleness thresholds for the two capture attempts.
///
/// The default thresholds are the ones observed in production use: a tight
/// ~1 s gate on the primary tier and a looser ~5 s gate on the fallback.
/// They are tunable fields rather than constants baked into the algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturePolicy {
    /// Bounded wait for the high-accuracy attempt.
    pub primary_timeout: Duration,
    /// Bounded wait for the coarse fallback attempt.
    pub fallback_timeout: Duration,
    /// Maximum reading age accepted on the primary tier.
    pub primary_max_age: Duration,
    /// Maximum reading age accepted on the fallback tier.
    pub fallback_max_age: Duration,
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self {
            primary_timeout: Duration::from_secs(10),
            fallback_timeout: Duration::from_secs(30),
            primary_max_age: Duration::from_secs(1),
            fallback_max_age: Duration::from_secs(5),
        }
    }
}

/// Acquires one validated fix under the two-attempt policy.
///
/// The fallback attempt runs only after a primary timeout. A stale
/// rejection is terminal: the facility answered, just with a cached value,
/// and retrying on a coarser tier would only make that more likely.
///
/// # Errors
///
/// Returns [`GpsError::Unsupported`] when no facility is available,
/// [`GpsError::Stale`] / [`GpsError::OutOfRange`] for rejected readings,
/// and the mapped facility cause otherwise.
pub async fn capture_fix<S: LocationSource>(
    source: &S,
    purpose: FixPurpose,
    policy: &CapturePolicy,
) -> Result<GeoFix, GpsError> {
    if !source.is_available() {
        return Err(GpsError::Unsupported);
    }

    match attempt(
        source,
        AccuracyTier::High,
        policy.primary_timeout,
        policy.primary_max_age,
    )
    .await
    {
        Err(GpsError::Timeout) => {
            tracing::debug!(?purpose, "primary fix attempt timed out; retrying on coarse tier");
            attempt(
                source,
                AccuracyTier::Coarse,
                policy.fallback_timeout,
                policy.fallback_max_age,
            )
            .await
        }
        outcome => outcome,
    }
}

/// One acquisition attempt: bounded wait, staleness gate, range check.
async fn attempt<S: LocationSource>(
    source: &S,
    tier: AccuracyTier,
    wait: Duration,
    max_age: Duration,
) -> Result<GeoFix, GpsError> {
    let request = FixRequest {
        tier,
        timeout: wait,
    };

    let raw = match tokio::time::timeout(wait, source.acquire(request)).await {
        Err(_) | Ok(Err(SourceError::Timeout)) => return Err(GpsError::Timeout),
        Ok(Err(SourceError::PermissionDenied)) => return Err(GpsError::PermissionDenied),
        Ok(Err(SourceError::PositionUnavailable)) => return Err(GpsError::PositionUnavailable),
        Ok(Ok(raw)) => raw,
    };

    let age_ms = (Utc::now() - raw.captured_at).num_milliseconds();
    let max_age_ms = i64::try_from(max_age.as_millis()).unwrap_or(i64::MAX);
    if age_ms > max_age_ms {
        return Err(GpsError::Stale { age_ms, max_age_ms });
    }

    GeoFix::new(raw.latitude, raw.longitude, raw.accuracy_m, raw.captured_at)
        .map_err(GpsError::from)
}
