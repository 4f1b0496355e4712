//! Natural-language building filters
//!
//! Queries such as "height > 100 ft" or "commercial buildings" are turned
//! into a single [`FilterExpression`] by an ordered rule chain, falling back
//! to a text generator when configured. [`apply_filter`] evaluates the result
//! over building records.

mod evaluator;
mod fallback;
mod parser;
mod types;
mod units;

pub use evaluator::{apply_filter, matches, EQUALITY_EPSILON};
pub use fallback::{build_prompt, interpret_generation};
pub use parser::{parse_rules, FilterParser, KNOWN_TYPES};
pub use types::{Attribute, FilterExpression, FilterValue, Operator, UnknownOperator};
pub use units::{format_number, normalize_area, normalize_height, FT2_TO_M2, FT_TO_M};
