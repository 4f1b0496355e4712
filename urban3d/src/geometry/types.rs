//! Geometry type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Equatorial Earth radius used by the local projection, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A west/south/east/north rectangle in geographic degrees.
///
/// `west < east` and `south < north` are expected but not validated;
/// callers own that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Creates a bounding box from its four edges.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Returns the centre of the box as `(lat, lon)`.
    ///
    /// Used as the origin of the local planar projection when deriving
    /// footprint areas.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[W {}, S {}, E {}, N {}]",
            self.west, self.south, self.east, self.north
        )
    }
}

/// A geographic point in degrees.
///
/// Serialized as a `[lat, lon]` pair, which is the shape clients render
/// footprints from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for LatLon {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLon> for (f64, f64) {
    fn from(point: LatLon) -> Self {
        (point.lat, point.lon)
    }
}
