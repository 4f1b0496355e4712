//! Applies a filter to building records.

use super::types::{Attribute, FilterExpression, FilterValue, Operator};
use crate::buildings::BuildingRecord;

/// Absolute tolerance for `=` on floats.
pub const EQUALITY_EPSILON: f64 = 1e-9;

/// Ids of the buildings matching `filter`, in input order.
///
/// No filter matches nothing.
pub fn apply_filter(buildings: &[BuildingRecord], filter: Option<&FilterExpression>) -> Vec<i64> {
    let Some(filter) = filter else {
        return Vec::new();
    };

    buildings
        .iter()
        .filter(|building| matches(building, filter))
        .map(|building| building.id)
        .collect()
}

/// True if `building` satisfies `filter`.
///
/// Numeric attributes are compared as floats; a record whose levels are not
/// a number, or a filter value that is not one, never matches.
pub fn matches(building: &BuildingRecord, filter: &FilterExpression) -> bool {
    if !filter.attribute.is_numeric() {
        return matches_type(&building.building_type, filter);
    }

    let Some(actual) = numeric_field(building, filter.attribute) else {
        return false;
    };
    let Some(expected) = filter.value.as_number() else {
        return false;
    };
    compare(filter.operator, actual, expected)
}

fn numeric_field(building: &BuildingRecord, attribute: Attribute) -> Option<f64> {
    match attribute {
        Attribute::HeightM => Some(building.height_m),
        Attribute::AreaM2 => Some(building.area_m2),
        Attribute::Levels => building.levels.trim().parse().ok(),
        Attribute::Type => None,
    }
}

fn matches_type(building_type: &str, filter: &FilterExpression) -> bool {
    let building_type = building_type.to_lowercase();
    match filter.operator {
        Operator::In => filter
            .value
            .items()
            .iter()
            .any(|item| building_type.contains(item.as_str())),
        _ => match &filter.value {
            FilterValue::Text(s) => building_type == s.to_lowercase(),
            FilterValue::Number(n) => building_type == n.to_string(),
            FilterValue::List(_) => false,
        },
    }
}

fn compare(operator: Operator, actual: f64, expected: f64) -> bool {
    match operator {
        Operator::Gt => actual > expected,
        Operator::Ge => actual >= expected,
        Operator::Lt => actual < expected,
        Operator::Le => actual <= expected,
        Operator::Eq => (actual - expected).abs() < EQUALITY_EPSILON,
        Operator::In => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings::LEVELS_UNKNOWN;
    use crate::geometry::LatLon;

    fn building(id: i64, building_type: &str, height_m: f64, area_m2: f64, levels: &str) -> BuildingRecord {
        BuildingRecord {
            id,
            address: "Unknown".to_string(),
            building_type: building_type.to_string(),
            height_m,
            area_m2,
            levels: levels.to_string(),
            coords: vec![
                LatLon::new(51.0, -114.0),
                LatLon::new(51.0, -114.001),
                LatLon::new(51.001, -114.0),
                LatLon::new(51.0, -114.0),
            ],
        }
    }

    fn sample() -> Vec<BuildingRecord> {
        vec![
            building(1, "office", 50.0, 1200.0, "12"),
            building(2, "Retail", 6.0, 300.0, "2"),
            building(3, "apartments", 21.0, 800.0, LEVELS_UNKNOWN),
            building(4, "commercial;retail", 9.0, 150.0, "3"),
        ]
    }

    fn filter(attribute: Attribute, operator: Operator, value: impl Into<FilterValue>) -> FilterExpression {
        FilterExpression::new(attribute, operator, value)
    }

    #[test]
    fn test_no_filter_matches_nothing() {
        assert!(apply_filter(&sample(), None).is_empty());
    }

    #[test]
    fn test_height_comparisons() {
        let buildings = sample();
        let ge = filter(Attribute::HeightM, Operator::Ge, "50.0");
        assert_eq!(apply_filter(&buildings, Some(&ge)), vec![1]);

        let le = filter(Attribute::HeightM, Operator::Le, "21");
        assert_eq!(apply_filter(&buildings, Some(&le)), vec![2, 3, 4]);

        let lt = filter(Attribute::HeightM, Operator::Lt, FilterValue::Number(9.0));
        assert_eq!(apply_filter(&buildings, Some(&lt)), vec![2]);
    }

    #[test]
    fn test_equality_uses_epsilon() {
        let buildings = sample();
        let near = filter(Attribute::HeightM, Operator::Eq, "50.0000000001");
        assert_eq!(apply_filter(&buildings, Some(&near)), vec![1]);

        let far = filter(Attribute::HeightM, Operator::Eq, "50.001");
        assert!(apply_filter(&buildings, Some(&far)).is_empty());
    }

    #[test]
    fn test_area() {
        let gt = filter(Attribute::AreaM2, Operator::Gt, "18.5806");
        assert_eq!(apply_filter(&sample(), Some(&gt)), vec![1, 2, 3, 4]);

        let gt = filter(Attribute::AreaM2, Operator::Gt, "500.0");
        assert_eq!(apply_filter(&sample(), Some(&gt)), vec![1, 3]);
    }

    #[test]
    fn test_unknown_levels_are_excluded() {
        let gt = filter(Attribute::Levels, Operator::Gt, "1");
        assert_eq!(apply_filter(&sample(), Some(&gt)), vec![1, 2, 4]);
    }

    #[test]
    fn test_non_numeric_filter_value_matches_nothing() {
        let bad = filter(Attribute::HeightM, Operator::Gt, "tall");
        assert!(apply_filter(&sample(), Some(&bad)).is_empty());

        let list = filter(Attribute::Levels, Operator::Gt, vec!["3".to_string()]);
        assert!(apply_filter(&sample(), Some(&list)).is_empty());
    }

    #[test]
    fn test_in_on_numeric_attribute_matches_nothing() {
        let in_filter = filter(Attribute::HeightM, Operator::In, "9");
        assert!(apply_filter(&sample(), Some(&in_filter)).is_empty());
    }

    #[test]
    fn test_type_in_is_case_insensitive_substring() {
        let retail = filter(Attribute::Type, Operator::In, vec!["RETAIL".to_string()]);
        assert_eq!(apply_filter(&sample(), Some(&retail)), vec![2, 4]);

        let several = filter(
            Attribute::Type,
            Operator::In,
            vec!["apartment".to_string(), "office".to_string()],
        );
        assert_eq!(apply_filter(&sample(), Some(&several)), vec![1, 3]);
    }

    #[test]
    fn test_type_equality_is_exact() {
        let retail = filter(Attribute::Type, Operator::Eq, "retail");
        assert_eq!(apply_filter(&sample(), Some(&retail)), vec![2]);

        let list = filter(Attribute::Type, Operator::Eq, vec!["retail".to_string()]);
        assert!(apply_filter(&sample(), Some(&list)).is_empty());
    }

    #[test]
    fn test_output_keeps_input_order() {
        let mut buildings = sample();
        buildings.reverse();
        let all = filter(Attribute::HeightM, Operator::Gt, "0");
        assert_eq!(apply_filter(&buildings, Some(&all)), vec![4, 3, 2, 1]);
    }
}
