//! Tests for projection and area

use super::*;

const LAT0: f64 = 51.0474;
const LON0: f64 = -114.069;

/// A roughly 20 m × 30 m rectangle near the origin, closed.
fn rectangle() -> Vec<LatLon> {
    let dlat = 30.0 / 111_319.49;
    let dlon = 20.0 / (111_319.49 * LAT0.to_radians().cos());
    vec![
        LatLon::new(LAT0, LON0),
        LatLon::new(LAT0, LON0 + dlon),
        LatLon::new(LAT0 + dlat, LON0 + dlon),
        LatLon::new(LAT0 + dlat, LON0),
        LatLon::new(LAT0, LON0),
    ]
}

#[test]
fn test_project_origin_is_zero() {
    let (x, y) = project(LAT0, LON0, LAT0, LON0);
    assert_eq!(x, 0.0);
    assert_eq!(y, 0.0);
}

#[test]
fn test_project_one_degree_north() {
    let (x, y) = project(1.0, 0.0, 0.0, 0.0);
    assert_eq!(x, 0.0);
    assert!((y - 111_319.49).abs() < 0.01, "got {}", y);
}

#[test]
fn test_project_longitude_scaled_by_mean_latitude() {
    let (x, _) = project(60.0, 1.0, 60.0, 0.0);
    let expected = 1f64.to_radians() * EARTH_RADIUS_M * 0.5;
    assert!((x - expected).abs() < 1e-6);
}

#[test]
fn test_rectangle_area() {
    let area = polygon_area(&rectangle(), LAT0, LON0);
    assert!((area - 600.0).abs() < 1.0, "area was {}", area);
}

#[test]
fn test_area_invariant_under_winding() {
    let ring = rectangle();
    let mut reversed = ring.clone();
    reversed.reverse();

    let forward = polygon_area(&ring, LAT0, LON0);
    let backward = polygon_area(&reversed, LAT0, LON0);

    assert!(forward >= 0.0);
    assert!((forward - backward).abs() < 1e-6);
}

#[test]
fn test_area_independent_of_origin_offset() {
    // Shoelace over a closed ring is translation invariant; a nearby origin
    // only changes the cosine scaling marginally.
    let near = polygon_area(&rectangle(), LAT0 + 0.001, LON0 - 0.001);
    let at = polygon_area(&rectangle(), LAT0, LON0);
    assert!((near - at).abs() < 0.5);
}

#[test]
fn test_degenerate_rings_have_no_area() {
    assert_eq!(polygon_area(&[], LAT0, LON0), 0.0);
    assert_eq!(polygon_area(&[LatLon::new(LAT0, LON0)], LAT0, LON0), 0.0);

    let collinear = vec![
        LatLon::new(LAT0, LON0),
        LatLon::new(LAT0 + 0.001, LON0 + 0.001),
        LatLon::new(LAT0 + 0.002, LON0 + 0.002),
        LatLon::new(LAT0, LON0),
    ];
    assert!(polygon_area(&collinear, LAT0, LON0) < 1.0);
}

#[test]
fn test_bbox_center() {
    let bbox = BoundingBox::new(-114.0715, 51.0455, -114.0665, 51.0493);
    let (lat0, lon0) = bbox.center();
    assert!((lat0 - 51.0474).abs() < 1e-9);
    assert!((lon0 - -114.069).abs() < 1e-9);
}

#[test]
fn test_latlon_serializes_as_pair() {
    let point = LatLon::new(51.0, -114.0);
    let json = serde_json::to_string(&point).unwrap();
    assert_eq!(json, "[51.0,-114.0]");

    let parsed: LatLon = serde_json::from_str("[1.5,2.5]").unwrap();
    assert_eq!(parsed, LatLon::new(1.5, 2.5));
}

#[test]
fn test_round_to() {
    assert_eq!(round_to(1.234567, 2), 1.23);
    assert_eq!(round_to(600.005_1, 2), 600.01);
}
