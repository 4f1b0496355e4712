//! Generative fallback extraction.
//!
//! Everything here is best effort: transport errors, missing JSON, unknown
//! attributes and unconvertible values all end as `None`.

use super::parser::LEVEL_WORDS;
use super::types::{Attribute, FilterExpression, FilterValue, Operator};
use super::units::{format_number, normalize_area, normalize_height};
use crate::provider::TextGenerator;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

fn json_object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid json object regex"))
}

fn level_word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!("^{}$", LEVEL_WORDS)).expect("valid level word regex")
    })
}

/// Filter as the model writes it, before normalisation.
#[derive(Debug, Deserialize)]
struct RawFilter {
    #[serde(default)]
    attribute: String,
    #[serde(default)]
    operator: String,
    #[serde(default)]
    value: Option<Value>,
}

/// Prompt asking for a single strict-JSON filter.
pub fn build_prompt(query: &str) -> String {
    format!(
        "Extract one filter from this query as strict JSON with keys attribute, operator, value. \
         Attributes: height_m, levels, area_m2, type. Operators: >, >=, <, <=, =, in. \
         If asking for a type, use operator 'in' and value as a list. \
         Query: {}\nJSON:",
        query
    )
}

/// Asks `generator` once and interprets its reply.
pub async fn extract_with_generator(
    generator: &dyn TextGenerator,
    query: &str,
) -> Option<FilterExpression> {
    let prompt = build_prompt(query);
    match generator.generate(&prompt).await {
        Ok(generated) => {
            let filter = interpret_generation(query, &generated);
            debug!(
                parsed = filter.is_some(),
                generated_len = generated.len(),
                "Text generator answered"
            );
            filter
        }
        Err(err) => {
            debug!(error = %err, "Text generator failed, no filter");
            None
        }
    }
}

/// Reads a filter out of generated text.
///
/// Takes the span from the first `{` to the last `}`, decodes it and maps
/// attribute synonyms onto the canonical set. Height and area values are
/// unit-normalised against the user's query.
pub fn interpret_generation(query: &str, generated: &str) -> Option<FilterExpression> {
    let object = json_object_pattern().find(generated)?.as_str();
    let raw: RawFilter = match serde_json::from_str(object) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(error = %err, "Generated filter is not valid JSON");
            return None;
        }
    };

    let attribute = normalize_attribute(&raw.attribute)?;
    let operator: Operator = raw.operator.parse().ok()?;
    let value = normalize_value(attribute, query, raw.value?)?;

    Some(FilterExpression {
        attribute,
        operator,
        value,
    })
}

fn normalize_attribute(raw: &str) -> Option<Attribute> {
    let lowered = raw.trim().to_lowercase();
    match lowered.as_str() {
        "height" | "height_m" => Some(Attribute::HeightM),
        "area" | "area_m2" => Some(Attribute::AreaM2),
        "type" => Some(Attribute::Type),
        other if level_word_pattern().is_match(other) => Some(Attribute::Levels),
        _ => None,
    }
}

fn normalize_value(attribute: Attribute, query: &str, value: Value) -> Option<FilterValue> {
    match attribute {
        Attribute::HeightM => {
            let metres = normalize_height(query, &scalar_text(&value)?)?;
            Some(FilterValue::Text(format_number(metres)))
        }
        Attribute::AreaM2 => {
            let square_metres = normalize_area(query, &scalar_text(&value)?)?;
            Some(FilterValue::Text(format_number(square_metres)))
        }
        Attribute::Levels => match value {
            Value::Number(n) => n.as_f64().map(FilterValue::Number),
            Value::String(s) => Some(FilterValue::Text(s)),
            _ => None,
        },
        Attribute::Type => match value {
            Value::String(s) => Some(FilterValue::Text(s)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(FilterValue::List),
            _ => None,
        },
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
