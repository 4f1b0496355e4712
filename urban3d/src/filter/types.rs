//! Structured filter types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Building attribute a filter constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "height_m")]
    HeightM,
    #[serde(rename = "levels")]
    Levels,
    #[serde(rename = "area_m2")]
    AreaM2,
    #[serde(rename = "type")]
    Type,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::HeightM => "height_m",
            Attribute::Levels => "levels",
            Attribute::AreaM2 => "area_m2",
            Attribute::Type => "type",
        }
    }

    /// True for attributes compared as floating point numbers.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Attribute::Type)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "in")]
    In,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Eq => "=",
            Operator::In => "in",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator text outside `>`, `>=`, `<`, `<=`, `=`, `in`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operator: {0}")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            "=" => Ok(Operator::Eq),
            "in" => Ok(Operator::In),
            _ => Err(UnknownOperator(s.to_string())),
        }
    }
}

/// Right-hand side of a filter.
///
/// Rule-extracted numeric values are carried as text (`"30.48"`); the
/// fallback extractor may also produce bare numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Coerces the value to a float; lists and non-numeric text yield `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FilterValue::Number(n) => Some(*n),
            FilterValue::Text(s) => s.trim().parse().ok(),
            FilterValue::List(_) => None,
        }
    }

    /// Trimmed lowercase items, a scalar counting as a one-item list.
    pub fn items(&self) -> Vec<String> {
        match self {
            FilterValue::Number(n) => vec![n.to_string()],
            FilterValue::Text(s) => vec![s.trim().to_lowercase()],
            FilterValue::List(list) => list.iter().map(|s| s.trim().to_lowercase()).collect(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(list: Vec<String>) -> Self {
        FilterValue::List(list)
    }
}

/// One attribute/operator/value triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterExpression {
    pub attribute: Attribute,
    pub operator: Operator,
    pub value: FilterValue,
}

impl FilterExpression {
    pub fn new(attribute: Attribute, operator: Operator, value: impl Into<FilterValue>) -> Self {
        Self {
            attribute,
            operator,
            value: value.into(),
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            FilterValue::Number(n) => write!(f, "{} {} {}", self.attribute, self.operator, n),
            FilterValue::Text(s) => write!(f, "{} {} {}", self.attribute, self.operator, s),
            FilterValue::List(list) => {
                write!(f, "{} {} [{}]", self.attribute, self.operator, list.join(", "))
            }
        }
    }
}
