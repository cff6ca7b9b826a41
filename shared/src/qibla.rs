//! Qibla geodesy on a spherical earth
//!
//! Public functions take and return degrees; trigonometry runs in radians.
//! Bearings and deltas are always normalized into `[0, 360)` so compass
//! rendering never has to deal with negative or wrapped angles.

use crate::models::{BearingResult, OrientationReading};
use crate::types::{GeoPoint, KAABA};

/// Mean earth radius (IUGG), kilometres
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

/// Below this distance a point is treated as standing at the Ka'bah
const SAME_POINT_KM: f64 = 1e-6;

/// Fold any angle into `[0, 360)`
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Initial great-circle bearing (forward azimuth) from `from` to `to`
pub fn initial_bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    normalize_degrees(y.atan2(x).to_degrees())
}

/// Haversine distance between two points, kilometres
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_phi = (to.latitude - from.latitude).to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let a = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);

    // Clamp guards asin against rounding just above 1 near the antipode
    2.0 * EARTH_MEAN_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Qibla bearing from a location, degrees clockwise from true north
pub fn qibla_bearing(latitude: f64, longitude: f64) -> f64 {
    compute_qibla(GeoPoint::new(latitude, longitude)).bearing_degrees
}

/// Distance from a location to the Ka'bah, kilometres
pub fn qibla_distance_km(latitude: f64, longitude: f64) -> f64 {
    haversine_km(GeoPoint::new(latitude, longitude), KAABA)
}

/// Bearing and distance to the Ka'bah.
///
/// At the Ka'bah itself the bearing is undefined; the result is then
/// `0°` and `0 km`.
pub fn compute_qibla(point: GeoPoint) -> BearingResult {
    let distance_km = haversine_km(point, KAABA);
    if distance_km < SAME_POINT_KM {
        return BearingResult {
            bearing_degrees: 0.0,
            distance_km: 0.0,
        };
    }

    BearingResult {
        bearing_degrees: initial_bearing(point, KAABA),
        distance_km,
    }
}

/// Rotation to apply to a compass readout (0 = north, clockwise) so that
/// "forward" points at the qibla. Works the same for a live sensor heading
/// and a manually entered one.
pub fn heading_delta(bearing: f64, device_heading: f64) -> f64 {
    normalize_degrees(bearing - device_heading)
}

/// Compass heading from a device orientation sample.
///
/// iOS reports `webkitCompassHeading` directly. Elsewhere only an absolute
/// `alpha` (counter-clockwise) is usable. Relative readings give `None`.
pub fn heading_from_orientation(reading: &OrientationReading) -> Option<f64> {
    if let Some(heading) = reading.webkit_compass_heading.filter(|h| h.is_finite()) {
        return Some(normalize_degrees(heading));
    }

    match reading.alpha {
        Some(alpha) if reading.absolute && alpha.is_finite() => {
            Some(normalize_degrees(360.0 - alpha))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALEMBANG: GeoPoint = GeoPoint::new(-2.990934, 104.756554);

    #[test]
    fn test_palembang_bearing() {
        let bearing = qibla_bearing(PALEMBANG.latitude, PALEMBANG.longitude);
        assert!((bearing - 295.0).abs() <= 1.0, "bearing was {}", bearing);
    }

    #[test]
    fn test_palembang_distance() {
        let distance = qibla_distance_km(PALEMBANG.latitude, PALEMBANG.longitude);
        assert!((distance - 7559.6).abs() < 1.0, "distance was {}", distance);
    }

    #[test]
    fn test_at_kaaba_is_sentinel() {
        let result = compute_qibla(KAABA);
        assert_eq!(result.bearing_degrees, 0.0);
        assert_eq!(result.distance_km, 0.0);
    }

    #[test]
    fn test_cardinal_directions() {
        // Due south of the Ka'bah on the same meridian faces north
        let south = GeoPoint::new(0.0, KAABA.longitude);
        assert!(initial_bearing(south, KAABA).abs() < 1e-9);

        // Due north faces south
        let north = GeoPoint::new(45.0, KAABA.longitude);
        assert!((initial_bearing(north, KAABA) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_london_faces_south_east() {
        let bearing = qibla_bearing(51.5074, -0.1278);
        assert!((bearing - 119.0).abs() < 0.5, "bearing was {}", bearing);
    }

    #[test]
    fn test_antipode_distance_is_half_circumference() {
        let antipode = GeoPoint::new(-KAABA.latitude, KAABA.longitude - 180.0);
        let distance = haversine_km(antipode, KAABA);
        let half = std::f64::consts::PI * EARTH_MEAN_RADIUS_KM;
        assert!((distance - half).abs() < 1e-3);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(725.0), 5.0);
        assert_eq!(normalize_degrees(-1e-15), 0.0);
    }

    #[test]
    fn test_heading_delta() {
        assert_eq!(heading_delta(295.0, 295.0), 0.0);
        assert_eq!(heading_delta(10.0, 350.0), 20.0);
        assert_eq!(heading_delta(350.0, 10.0), 340.0);
    }

    #[test]
    fn test_heading_from_webkit() {
        let reading = OrientationReading {
            alpha: Some(10.0),
            absolute: true,
            webkit_compass_heading: Some(370.0),
        };
        assert_eq!(heading_from_orientation(&reading), Some(10.0));
    }

    #[test]
    fn test_heading_from_absolute_alpha() {
        let reading = OrientationReading {
            alpha: Some(90.0),
            absolute: true,
            webkit_compass_heading: None,
        };
        assert_eq!(heading_from_orientation(&reading), Some(270.0));

        let zero = OrientationReading {
            alpha: Some(0.0),
            ..reading
        };
        assert_eq!(heading_from_orientation(&zero), Some(0.0));
    }

    #[test]
    fn test_relative_alpha_is_unusable() {
        let reading = OrientationReading {
            alpha: Some(90.0),
            absolute: false,
            webkit_compass_heading: None,
        };
        assert_eq!(heading_from_orientation(&reading), None);
        assert_eq!(heading_from_orientation(&OrientationReading::default()), None);
    }
}
