//! Coordinate value type and great-circle distance.

use serde::{Deserialize, Serialize};

/// A geographic point. Latitude in [-90, 90], longitude in [-180, 180];
/// resolvers are the only producers, so the ranges are not re-validated here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometres (haversine).
///
/// Symmetric in its arguments and exactly 0.0 for equal points. Antipodal
/// pairs get whatever the formula yields (~20015 km), no special casing.
pub fn haversine_distance(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const LIMA: Coordinates = Coordinates { lat: -12.0600, lon: -77.0375 };
    const LONDON: Coordinates = Coordinates { lat: 51.5072, lon: -0.1276 };

    #[test]
    fn test_self_distance_is_zero() {
        assert_eq!(haversine_distance(LIMA, LIMA), 0.0);
        let origin = Coordinates::new(0.0, 0.0);
        assert_eq!(haversine_distance(origin, origin), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine_distance(LIMA, LONDON);
        let d2 = haversine_distance(LONDON, LIMA);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_lima_london() {
        let d = haversine_distance(LIMA, LONDON);
        assert_relative_eq!(d, 10171.14, epsilon = 0.01);
    }

    #[test]
    fn test_antipodal() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 180.0);
        // Half the Earth's circumference: pi * R
        assert_relative_eq!(haversine_distance(a, b), std::f64::consts::PI * 6371.0, epsilon = 1e-3);
        assert_eq!(haversine_distance(a, b), haversine_distance(b, a));
    }

    #[test]
    fn test_paris_berlin() {
        let paris = Coordinates::new(48.8566, 2.3522);
        let berlin = Coordinates::new(52.5200, 13.4050);
        assert_relative_eq!(haversine_distance(paris, berlin), 877.46, epsilon = 0.01);
    }
}
