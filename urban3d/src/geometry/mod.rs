//! Footprint geometry
//!
//! Converts geographic ring coordinates into a local planar projection,
//! measures polygon area, and estimates building height from OSM tags.
//! Everything here is pure and stateless.

mod height;
mod types;

pub use height::{estimate_height, Tags, DEFAULT_HEIGHT_M, METERS_PER_LEVEL};
pub use types::{BoundingBox, LatLon, EARTH_RADIUS_M};

/// Projects a point into local planar meters around an origin.
///
/// Equirectangular approximation: longitude is scaled by the cosine of the
/// mean latitude between the point and the origin. Accurate enough for
/// footprints spanning a few city blocks.
#[inline]
pub fn project(lat: f64, lon: f64, lat0: f64, lon0: f64) -> (f64, f64) {
    let mean_lat = ((lat + lat0) / 2.0).to_radians();
    let x = (lon - lon0).to_radians() * EARTH_RADIUS_M * mean_lat.cos();
    let y = (lat - lat0).to_radians() * EARTH_RADIUS_M;
    (x, y)
}

/// Computes the area of a closed ring in square meters.
///
/// The ring must already be closed (first point repeated as last); this
/// function does not check or repair that. Degenerate rings (fewer than
/// three distinct points, or collinear points) yield ~0.
pub fn polygon_area(ring: &[LatLon], lat0: f64, lon0: f64) -> f64 {
    let points: Vec<(f64, f64)> = ring
        .iter()
        .map(|p| project(p.lat, p.lon, lat0, lon0))
        .collect();

    let twice_area: f64 = points
        .windows(2)
        .map(|pair| {
            let (x1, y1) = pair[0];
            let (x2, y2) = pair[1];
            x1 * y2 - x2 * y1
        })
        .sum();

    twice_area.abs() * 0.5
}

/// Rounds a value to the given number of decimal places.
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests;
