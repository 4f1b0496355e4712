//! Unit detection and conversion for extracted filter values.
//!
//! Both detectors scan the whole text they are given, not just the unit token
//! next to the number, so a query mentioning feet anywhere converts its value.

use regex::Regex;
use std::sync::OnceLock;

/// Metres per foot.
pub const FT_TO_M: f64 = 0.3048;

/// Square metres per square foot.
pub const FT2_TO_M2: f64 = 0.092903;

fn feet_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\b(feet|foot|ft)\b").expect("valid feet regex"))
}

fn square_feet_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(sq\s*ft|ft2|ft²|square\s*feet)").expect("valid square feet regex")
    })
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse().ok()
}

/// True if `text` states a length in feet.
pub fn mentions_feet(text: &str) -> bool {
    feet_pattern().is_match(text)
}

/// True if `text` states an area in square feet.
pub fn mentions_square_feet(text: &str) -> bool {
    square_feet_pattern().is_match(text)
}

/// Parses `value` as metres, converting from feet when `text` mentions feet.
pub fn normalize_height(text: &str, value: &str) -> Option<f64> {
    let v = parse_number(value)?;
    Some(if mentions_feet(text) { v * FT_TO_M } else { v })
}

/// Parses `value` as square metres, converting when `text` mentions square feet.
pub fn normalize_area(text: &str, value: &str) -> Option<f64> {
    let v = parse_number(value)?;
    Some(if mentions_square_feet(text) { v * FT2_TO_M2 } else { v })
}

/// Renders a float the way filter values are exchanged: shortest round-trip
/// digits, integral values keeping a trailing `.0`, and scientific notation
/// with a signed two-digit exponent below `1e-4` or from `1e16` up
/// (`1e+20`, `1.5e-05`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = value.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        return scientific(value);
    }

    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn scientific(value: f64) -> String {
    // `{:e}` yields shortest round-trip digits, e.g. "1.5e-5".
    let text = format!("{:e}", value);
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}
