//! Great-circle geometry for tour planning.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::EARTH_RADIUS_KM;

/// A point on the globe in decimal degrees.
///
/// Serialized as a `[longitude, latitude]` pair to match the map surface's
/// coordinate order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both components are finite and inside the WGS-84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        distance_km(*self, *other)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.lon, coordinate.lat]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lon, self.lat)
    }
}

/// Haversine distance between two coordinates in kilometres.
///
/// No range validation happens here: malformed input yields a meaningless
/// number rather than an error.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_to_self_is_zero() {
        let dhaka = Coordinate::new(90.4125, 23.8103);
        assert!(distance_km(dhaka, dhaka).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.05, "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(92.293, 23.382);
        let b = Coordinate::new(89.186, 21.948);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn dhaka_to_coxs_bazar_matches_known_range() {
        let d = distance_km(
            Coordinate::new(90.4125, 23.8103),
            Coordinate::new(91.979, 21.427),
        );
        assert!((300.0..320.0).contains(&d), "got {d}");
    }

    #[test]
    fn validity_checks_ranges_and_finiteness() {
        assert!(Coordinate::new(-180.0, 90.0).is_valid());
        assert!(!Coordinate::new(181.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -90.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn serializes_as_lon_lat_pair() {
        let json = serde_json::to_string(&Coordinate::new(91.5, 22.25)).unwrap();
        assert_eq!(json, "[91.5,22.25]");
        let back: Coordinate = serde_json::from_str("[10.0,-5.0]").unwrap();
        assert_eq!(back, Coordinate::new(10.0, -5.0));
    }
}
