//! Integration tests for natural-language filtering.
//!
//! Queries are parsed and evaluated against records assembled from an
//! Overpass response, the way the service does it.

use std::collections::HashMap;
use urban3d::buildings::{assemble_buildings, BuildingRecord};
use urban3d::filter::{apply_filter, parse_rules, Attribute, FilterParser, FilterValue, Operator};
use urban3d::geometry::BoundingBox;
use urban3d::provider::{Element, OverpassResponse};

fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Four square footprints sharing corner nodes, with assorted tags.
fn city_block() -> Vec<BuildingRecord> {
    let bbox = BoundingBox::new(-114.0715, 51.0455, -114.0665, 51.0493);
    let mut elements = vec![
        Element::Node { id: 1, lat: 51.0470, lon: -114.0700 },
        Element::Node { id: 2, lat: 51.0470, lon: -114.0690 },
        Element::Node { id: 3, lat: 51.0480, lon: -114.0690 },
        Element::Node { id: 4, lat: 51.0480, lon: -114.0700 },
    ];
    let ways = [
        (10, tags(&[("building", "commercial"), ("height", "120 m")])),
        (11, tags(&[("building", "apartments"), ("building:levels", "8")])),
        (12, tags(&[("building", "house")])),
        (13, tags(&[("building", "retail;office"), ("levels", "3"), ("height", "14.5")])),
    ];
    for (id, way_tags) in ways {
        elements.push(Element::Way {
            id,
            nodes: vec![1, 2, 3, 4, 1],
            tags: way_tags,
        });
    }
    assemble_buildings(&bbox, &OverpassResponse { elements })
}

async fn run(query: &str) -> Vec<i64> {
    let buildings = city_block();
    let filter = FilterParser::new().extract(query).await;
    apply_filter(&buildings, filter.as_ref())
}

#[tokio::test]
async fn test_feet_query_selects_tall_buildings() {
    // 100 ft = 30.48 m; heights are 120, 24, 9 and 14.5 m.
    assert_eq!(run("height > 100 ft").await, vec![10]);
}

#[tokio::test]
async fn test_level_query_skips_unknown_levels() {
    assert_eq!(run("levels >= 3").await, vec![11, 13]);
    assert_eq!(run("at most 5 floors").await, vec![13]);
}

#[tokio::test]
async fn test_type_query_matches_substrings() {
    assert_eq!(run("retail or house").await, vec![12, 13]);
    assert_eq!(run("Office buildings taller than 10m").await, vec![13]);
}

#[tokio::test]
async fn test_area_query_uses_derived_footprints() {
    let buildings = city_block();
    let area = buildings[0].area_m2;
    assert!(area > 7000.0 && area < 8000.0, "area {}", area);

    assert_eq!(run("area > 1000").await, vec![10, 11, 12, 13]);
    assert!(run("area < 1000").await.is_empty());
}

#[tokio::test]
async fn test_unparsed_query_matches_nothing() {
    assert!(run("purple unicorns").await.is_empty());
}

#[test]
fn test_rule_examples() {
    let filter = parse_rules("commercial buildings over 50m").unwrap();
    assert_eq!(filter.attribute, Attribute::Type);
    assert_eq!(filter.value, FilterValue::List(vec!["commercial".to_string()]));

    let filter = parse_rules("at least 200 sq ft area").unwrap();
    assert_eq!(filter.attribute, Attribute::AreaM2);
    assert_eq!(filter.operator, Operator::Gt);
    assert_eq!(filter.value, FilterValue::Text("18.5806".to_string()));
}

#[test]
fn test_unit_lookahead_scans_whole_query() {
    // The feet mention describes the park, but it still converts the height.
    let filter = parse_rules("height over 10 near a 500 ft wide park").unwrap();
    assert_eq!(filter.attribute, Attribute::HeightM);
    assert_eq!(filter.value, FilterValue::Text("3.048".to_string()));
}

#[test]
fn test_filter_json_round_trip_through_projects_shape() {
    let filter = parse_rules("no more than 4 storeys").unwrap();
    let json = serde_json::to_value(&filter).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"attribute": "levels", "operator": "<=", "value": "4"})
    );
    let back: urban3d::filter::FilterExpression = serde_json::from_value(json).unwrap();
    assert_eq!(back, filter);
}
