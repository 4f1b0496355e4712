//! Building height heuristic from OSM tags.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::round_to;

/// OSM tag map as delivered by the geodata service.
pub type Tags = HashMap<String, String>;

/// Height assumed per storey when only a level count is known.
pub const METERS_PER_LEVEL: f64 = 3.0;

/// Height used when neither a height nor a level count can be read.
pub const DEFAULT_HEIGHT_M: f64 = 9.0;

/// Tags consulted for a level count, in priority order.
const LEVEL_TAGS: [&str; 2] = ["building:levels", "levels"];

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("valid number regex"))
}

/// Extracts the first numeric substring of a tag value.
///
/// `"30 m"` → 30.0, `"approx. 12.5"` → 12.5, `"tall"` → None.
fn first_number(value: &str) -> Option<f64> {
    number_pattern()
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Estimates a building's height in meters.
///
/// Priority:
/// 1. first number in the `height` tag
/// 2. first number in `building:levels`, then `levels`, times 3.0 m
/// 3. 9.0 m
///
/// The result is rounded to two decimals.
pub fn estimate_height(tags: &Tags) -> f64 {
    let height = tags
        .get("height")
        .and_then(|v| first_number(v))
        .or_else(|| {
            LEVEL_TAGS
                .iter()
                .filter_map(|key| tags.get(*key))
                .find_map(|v| first_number(v))
                .map(|levels| levels * METERS_PER_LEVEL)
        })
        .unwrap_or(DEFAULT_HEIGHT_M);

    round_to(height, 2)
}
