//! Acquisition result and error types.

use crate::buildings::{BuildingRecord, BuildingsPayload};
use crate::cache::CacheError;
use crate::geometry::BoundingBox;
use crate::provider::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Where a returned payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    /// Fresh cache entry
    Cache,
    /// Fetched from the geodata service just now
    Live,
    /// Old cache entry served because the live fetch failed
    StaleCache,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Cache => write!(f, "cache"),
            DataSource::Live => write!(f, "live"),
            DataSource::StaleCache => write!(f, "stale-cache"),
        }
    }
}

/// Result of one acquisition call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchOutcome {
    pub bbox: BoundingBox,
    pub count: usize,
    pub buildings: Vec<BuildingRecord>,
    pub source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl FetchOutcome {
    pub fn from_payload(payload: BuildingsPayload, source: DataSource) -> Self {
        Self {
            bbox: payload.bbox,
            count: payload.count,
            buildings: payload.buildings,
            source,
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}

/// Failure of the live path with no stale entry to fall back on.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// Geodata service failed on every attempt
    #[error("{0}")]
    Upstream(#[from] ProviderError),

    /// Writing the fresh payload to the cache failed
    #[error("{0}")]
    Cache(#[from] CacheError),

    /// Payload could not be encoded for the cache
    #[error("payload encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
