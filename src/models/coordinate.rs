//! Geographic coordinate model.
//!
//! Work zones and executors carry a location as free text in the form
//! `"latitude, longitude"`. Missing or malformed locations are common in
//! real plans, so parsing never fails: it yields `None`, and every
//! distance involving a missing point is `+∞`.
//!
//! # Reference
//! Sinnott (1984), "Virtues of the Haversine", Sky and Telescope 68(2)

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula (km).
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated (latitude, longitude) pair in degrees.
///
/// Both components are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude (degrees).
    pub lat: f64,
    /// Longitude (degrees).
    pub lon: f64,
}

impl Coordinate {
    /// Creates a coordinate, rejecting non-finite components.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if lat.is_finite() && lon.is_finite() {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    /// Parses `"lat,lon"` (whitespace around either side is ignored).
    ///
    /// Returns `None` for empty input, a missing or repeated comma, or a
    /// side that is not a finite decimal number.
    pub fn parse(raw: &str) -> Option<Self> {
        let (lat, lon) = raw.split_once(',')?;
        if lon.contains(',') {
            return None;
        }
        let lat: f64 = lat.trim().parse().ok()?;
        let lon: f64 = lon.trim().parse().ok()?;
        Self::new(lat, lon)
    }

    /// Great-circle distance to `other` (km).
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        distance_km(self, other)
    }
}

/// Parses an optional raw location string. See [`Coordinate::parse`].
pub fn parse_coordinate(raw: Option<&str>) -> Option<Coordinate> {
    raw.and_then(Coordinate::parse)
}

/// Great-circle distance between two points using the haversine formula.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance when both points are known, `+∞` otherwise.
///
/// Makes "no location" sort strictly last in ascending rankings.
pub fn distance_or_infinite(a: Option<&Coordinate>, b: Option<&Coordinate>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => distance_km(a, b),
        _ => f64::INFINITY,
    }
}
