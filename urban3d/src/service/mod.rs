//! High-level service facade
//!
//! [`Urban3dService`] wires the acquisition pipeline, filter parser and
//! project store from a [`ConfigFile`](crate::config::ConfigFile).

mod error;
mod facade;

pub use error::ServiceError;
pub use facade::{OverpassService, QueryOutcome, Urban3dService, UNPARSED_QUERY_REASON};
