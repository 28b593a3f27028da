//! Spatial operations: coordinates, the service area and distances.
//!
//! Degrees are treated as locally planar. One degree is taken to be
//! [`METERS_PER_DEGREE`] meters on both axes, which only holds close to the
//! equator where the default service area (Bogotá) lies. This is a fixed
//! design constant, not a geodesic conversion.

use serde::{Deserialize, Serialize};

/// Meters per degree of latitude or longitude (1.11 m per 0.00001°).
pub const METERS_PER_DEGREE: f64 = 1.11 / 0.00001;

/// Convert a distance in meters to degrees using the fixed scale factor.
pub fn meters_to_degrees(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// A `(latitude, longitude)` pair in decimal degrees.
///
/// Serialized as a two-element JSON array `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate from raw wire values.
    ///
    /// Returns `None` unless the slice holds exactly two finite numbers.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [lat, lon] if lat.is_finite() && lon.is_finite() => Some(Self::new(*lat, *lon)),
            _ => None,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Shift by the given offsets in degrees.
    pub fn offset(&self, d_lat: f64, d_lon: f64) -> Self {
        Self::new(self.lat + d_lat, self.lon + d_lon)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self::new(lat, lon)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lat, coord.lon]
    }
}

/// Axis-aligned rectangle in which rider requests are served.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceArea {
    pub northeast: Coordinate,
    pub southwest: Coordinate,
}

impl ServiceArea {
    /// Bogotá, Colombia.
    pub const BOGOTA: ServiceArea = ServiceArea::new(
        Coordinate::new(4.784373420346989, -73.99595035691422),
        Coordinate::new(4.490865002856506, -74.27598825255971),
    );

    pub const fn new(northeast: Coordinate, southwest: Coordinate) -> Self {
        Self {
            northeast,
            southwest,
        }
    }

    /// Whether `coord` lies inside the rectangle. Edges are inclusive.
    pub fn contains(&self, coord: Coordinate) -> bool {
        // NaN fails every comparison, so non-finite input is rejected here too.
        coord.lat >= self.southwest.lat
            && coord.lat <= self.northeast.lat
            && coord.lon >= self.southwest.lon
            && coord.lon <= self.northeast.lon
    }
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self::BOGOTA
    }
}

/// Check a coordinate against the default service area.
pub fn is_within_service_area(coord: Coordinate) -> bool {
    ServiceArea::default().contains(coord)
}

/// Approximate distance in meters between two coordinates.
///
/// Scaled Manhattan (L1) distance: the sum of the absolute degree offsets on
/// both axes, converted with [`METERS_PER_DEGREE`].
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    ((a.lat - b.lat).abs() + (a.lon - b.lon).abs()) * METERS_PER_DEGREE
}
