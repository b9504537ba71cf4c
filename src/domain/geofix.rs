//! Validated location readings.
//!
//! [`GeoFix`] is the value object for a single GPS reading. Construction
//! enforces the coordinate range check, so any `GeoFix` held by the rest of
//! the system is known to carry plausible coordinates.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Coordinates outside the valid latitude/longitude ranges.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("coordinates out of range: latitude {latitude}, longitude {longitude}")]
pub struct CoordinateRangeError {
    /// The rejected latitude in degrees.
    pub latitude: f64,
    /// The rejected longitude in degrees.
    pub longitude: f64,
}

/// A single location reading.
///
/// Valid iff latitude ∈ [-90, 90] and longitude ∈ [-180, 180]; enforced by
/// [`GeoFix::new`]. `captured_at` is the device clock at acquisition, which
/// the capture validator compares against its staleness thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoFix {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Estimated horizontal accuracy in meters, when the device reports one.
    pub accuracy_m: Option<f64>,
    /// Device clock at acquisition.
    pub captured_at: DateTime<Utc>,
}

impl GeoFix {
    /// Builds a fix after range-checking the coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateRangeError`] when latitude is outside [-90, 90]
    /// or longitude is outside [-180, 180].
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy_m: Option<f64>,
        captured_at: DateTime<Utc>,
    ) -> Result<Self, CoordinateRangeError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateRangeError {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            accuracy_m,
            captured_at,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn at_epoch(latitude: f64, longitude: f64) -> Result<GeoFix, CoordinateRangeError> {
        GeoFix::new(latitude, longitude, None, DateTime::<Utc>::UNIX_EPOCH)
    }

    #[test]
    fn accepts_in_range_coordinates() {
        assert!(at_epoch(28.6139, 77.2090).is_ok());
    }

    #[test]
    fn accepts_range_boundaries() {
        assert!(at_epoch(90.0, 180.0).is_ok());
        assert!(at_epoch(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_latitude_out_of_range() {
        let err = at_epoch(90.5, 0.0);
        assert!(matches!(err, Err(CoordinateRangeError { .. })));
    }

    #[test]
    fn rejects_longitude_out_of_range() {
        assert!(at_epoch(0.0, -180.01).is_err());
        assert!(at_epoch(0.0, 181.0).is_err());
    }

    #[test]
    fn error_reports_offending_pair() {
        let Err(err) = at_epoch(-95.0, 200.0) else {
            panic!("expected range rejection");
        };
        assert_eq!(err.latitude, -95.0);
        assert_eq!(err.longitude, 200.0);
    }
}
