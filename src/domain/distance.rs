//! Great-circle distance between two fixes.
//!
//! The traveled distance of a journey is derived from its two endpoint
//! fixes with the haversine formula on a spherical Earth. Inputs are
//! trusted; range and freshness checks happen upstream in the capture
//! layer.

use super::geofix::GeoFix;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two fixes in kilometers.
#[must_use]
pub fn haversine_km(a: &GeoFix, b: &GeoFix) -> f64 {
    let phi_a = a.latitude.to_radians();
    let phi_b = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * central_angle
}

/// Journey distance for persistence: haversine rounded to two decimals.
///
/// Identical coordinates yield exactly `0.0`.
#[must_use]
pub fn journey_distance_km(a: &GeoFix, b: &GeoFix) -> f64 {
    (haversine_km(a, b) * 100.0).round() / 100.0
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn fix(latitude: f64, longitude: f64) -> GeoFix {
        let Ok(fix) = GeoFix::new(latitude, longitude, None, DateTime::<Utc>::UNIX_EPOCH) else {
            panic!("test coordinates must be in range");
        };
        fix
    }

    #[test]
    fn zero_for_identical_coordinates() {
        let p = fix(28.6139, 77.2090);
        assert_eq!(journey_distance_km(&p, &p), 0.0);
    }

    #[test]
    fn symmetric_in_its_arguments() {
        let a = fix(28.6139, 77.2090);
        let b = fix(19.0760, 72.8777);
        assert_eq!(haversine_km(&a, &b), haversine_km(&b, &a));
    }

    #[test]
    fn delhi_endpoints_measure_about_fourteen_km() {
        let start = fix(28.6139, 77.2090);
        let end = fix(28.7041, 77.1025);
        let km = journey_distance_km(&start, &end);
        assert!((km - 14.44).abs() < 0.05, "got {km}");
    }

    #[test]
    fn mumbai_to_pune_is_about_120_km() {
        let mumbai = fix(19.0760, 72.8777);
        let pune = fix(18.5204, 73.8567);
        let km = haversine_km(&mumbai, &pune);
        assert!((km - 120.2).abs() < 1.0, "got {km}");
    }

    #[test]
    fn rounds_to_two_decimals() {
        let a = fix(0.0, 0.0);
        let b = fix(0.001, 0.001);
        // Raw haversine is ~0.157253 km; storage value is the rounded one.
        assert_eq!(journey_distance_km(&a, &b), 0.16);
    }
}
