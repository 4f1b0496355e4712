//! Rule-based query parser with an optional generative fallback.

use super::fallback;
use super::types::{Attribute, FilterExpression, Operator};
use super::units::{format_number, normalize_area, normalize_height};
use crate::provider::TextGenerator;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Building types recognised by the type rule, in reporting order.
pub const KNOWN_TYPES: &[&str] = &[
    "commercial",
    "retail",
    "office",
    "residential",
    "apartments",
    "house",
    "industrial",
    "warehouse",
    "school",
    "church",
    "hospital",
    "hotel",
];

/// Words naming a storey count.
pub(crate) const LEVEL_WORDS: &str = r"(?:level|levels|storey|storeys|story|stories|floor|floors)";

const AREA_WORDS: &str = r"(?:area|sqm|m2|m²|square\s*met(?:er|re)s?|sq\s*ft|ft2|ft²)";

const NUMBER: &str = r"([0-9]+(?:\.[0-9]+)?)";

const UNIT: &str = r"(m|meter|meters|metre|metres|m2|m²|sq\s*ft|ft2|ft²|feet|foot|ft)";

/// Comparator phrases read as "greater than".
const GREATER_PHRASES: &[&str] = &["over", "more than", "greater than", "at least", "minimum", "min"];

/// A single matcher in the rule chain.
type Rule = fn(&str) -> Option<FilterExpression>;

/// Rules in priority order; the first to produce a filter wins.
const RULES: &[(&str, Rule)] = &[
    ("type", type_rule),
    ("explicit-attribute", explicit_attribute_rule),
    ("wordy-comparator", wordy_comparator_rule),
];

fn type_patterns() -> &'static [(&'static str, Regex)] {
    static PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        KNOWN_TYPES
            .iter()
            .map(|word| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
                (*word, Regex::new(&pattern).expect("valid type regex"))
            })
            .collect()
    })
}

/// `<attribute-word> ... [comparator] <number> [unit]`
fn explicit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern = format!(
            r"(?i)\b(height|{}|area)\b.*?(>=|<=|>|<|=)?\s*{}\s*{}?",
            LEVEL_WORDS, NUMBER, UNIT
        );
        Regex::new(&pattern).expect("valid explicit attribute regex")
    })
}

/// `<comparator-phrase> <number> [unit]`
fn wordy_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let pattern = format!(
            r"(?i)\b(over|more than|greater than|at least|minimum|min|under|less than|no more than|at most|max|maximum)\b\s*{}\s*{}?",
            NUMBER, UNIT
        );
        Regex::new(&pattern).expect("valid wordy comparator regex")
    })
}

fn level_words_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!("(?i){}", LEVEL_WORDS)).expect("valid level words regex")
    })
}

fn area_words_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!("(?i){}", AREA_WORDS)).expect("valid area words regex")
    })
}

/// Matches building-type words anywhere in the query.
fn type_rule(text: &str) -> Option<FilterExpression> {
    let found: Vec<String> = type_patterns()
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(word, _)| word.to_string())
        .collect();

    if found.is_empty() {
        return None;
    }
    Some(FilterExpression::new(Attribute::Type, Operator::In, found))
}

/// Matches an attribute word followed by an optional comparator and a number.
fn explicit_attribute_rule(text: &str) -> Option<FilterExpression> {
    let captures = explicit_pattern().captures(text)?;
    let attribute_word = captures.get(1)?.as_str().to_lowercase();
    let operator = match captures.get(2) {
        Some(symbol) => symbol.as_str().parse().ok()?,
        None => Operator::Gt,
    };
    let value = captures.get(3)?.as_str();
    let unit = captures.get(4).map(|m| m.as_str().to_lowercase()).unwrap_or_default();

    match attribute_word.as_str() {
        "height" => numeric_filter(Attribute::HeightM, operator, text, &unit, value),
        "area" => numeric_filter(Attribute::AreaM2, operator, text, &unit, value),
        _ => Some(FilterExpression::new(Attribute::Levels, operator, value)),
    }
}

/// Matches a comparator phrase and a number, inferring the attribute from
/// level or area words anywhere in the query.
fn wordy_comparator_rule(text: &str) -> Option<FilterExpression> {
    let captures = wordy_pattern().captures(text)?;
    let phrase = captures.get(1)?.as_str().to_lowercase();
    let operator = if GREATER_PHRASES.contains(&phrase.as_str()) {
        Operator::Gt
    } else {
        Operator::Le
    };
    let value = captures.get(2)?.as_str();
    let unit = captures.get(3).map(|m| m.as_str().to_lowercase()).unwrap_or_default();

    if level_words_pattern().is_match(text) {
        return Some(FilterExpression::new(Attribute::Levels, operator, value));
    }
    if area_words_pattern().is_match(text) {
        return numeric_filter(Attribute::AreaM2, operator, text, &unit, value);
    }
    numeric_filter(Attribute::HeightM, operator, text, &unit, value)
}

/// Builds a height or area filter, converting from imperial units when the
/// query (or its matched unit) mentions them.
fn numeric_filter(
    attribute: Attribute,
    operator: Operator,
    text: &str,
    unit: &str,
    value: &str,
) -> Option<FilterExpression> {
    let context = format!("{} {}", text, unit);
    let normalized = match attribute {
        Attribute::AreaM2 => normalize_area(&context, value)?,
        _ => normalize_height(&context, value)?,
    };
    Some(FilterExpression::new(attribute, operator, format_number(normalized)))
}

/// Runs the rule chain alone.
pub fn parse_rules(text: &str) -> Option<FilterExpression> {
    let text = text.trim();
    RULES.iter().find_map(|(name, rule)| {
        let filter = rule(text)?;
        debug!(rule = name, filter = %filter, "Query matched rule");
        Some(filter)
    })
}

/// Turns free-text queries into a [`FilterExpression`].
///
/// The rule chain runs first. When it finds nothing and a text generator is
/// configured, the generator is asked once; any failure there reads as "no
/// filter".
#[derive(Clone, Default)]
pub struct FilterParser {
    fallback: Option<Arc<dyn TextGenerator>>,
}

impl FilterParser {
    /// Creates a rules-only parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables the generative fallback.
    pub fn with_fallback(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.fallback = Some(generator);
        self
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Extracts one filter from `text`, or `None` if nothing could be read.
    pub async fn extract(&self, text: &str) -> Option<FilterExpression> {
        if let Some(filter) = parse_rules(text) {
            return Some(filter);
        }

        let generator = self.fallback.as_ref()?;
        debug!("No rule matched, asking text generator");
        fallback::extract_with_generator(generator.as_ref(), text).await
    }
}

impl fmt::Debug for FilterParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterParser")
            .field("fallback", &self.has_fallback())
            .finish()
    }
}
