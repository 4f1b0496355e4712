//! Overpass API geodata source
//!
//! Fetches every `building` way inside a bounding box together with the
//! nodes it references. A single call is a single attempt; retry and
//! backoff are owned by the acquisition pipeline.

use super::http::AsyncHttpClient;
use super::types::ProviderError;
use crate::geometry::{BoundingBox, Tags};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Default whole-request timeout for Overpass calls.
pub const DEFAULT_OVERPASS_TIMEOUT: Duration = Duration::from_secs(70);

/// Decoded Overpass `out:json` document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// One OSM primitive from an Overpass response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: Tags,
    },
    /// Relations and anything else the query may drag in.
    #[serde(other)]
    Other,
}

/// Source of raw building geometry for a bounding box.
pub trait GeodataSource: Send + Sync {
    /// Fetches building ways and their nodes inside `bbox`.
    fn fetch_buildings(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<OverpassResponse, ProviderError>> + Send;

    /// Returns the source's name for logging.
    fn name(&self) -> &str;
}

/// Overpass API client.
pub struct OverpassProvider<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
    timeout: Duration,
}

impl<C: AsyncHttpClient> OverpassProvider<C> {
    /// Creates a provider against the public Overpass endpoint.
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            endpoint: DEFAULT_OVERPASS_URL.to_string(),
            timeout: DEFAULT_OVERPASS_TIMEOUT,
        }
    }

    /// Creates a provider against a custom endpoint.
    pub fn with_endpoint(http_client: C, endpoint: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            timeout: DEFAULT_OVERPASS_TIMEOUT,
        }
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the Overpass QL query for all buildings in `bbox`.
    ///
    /// Overpass bounding boxes are ordered south, west, north, east. The
    /// `(._;>;)` recursion pulls in every node the ways reference.
    pub fn build_query(bbox: &BoundingBox) -> String {
        format!(
            "[out:json][timeout:60];\n( way[\"building\"]({},{},{},{}); );\n(._;>;); out body;\n",
            bbox.south, bbox.west, bbox.north, bbox.east
        )
    }
}

impl<C: AsyncHttpClient> GeodataSource for OverpassProvider<C> {
    async fn fetch_buildings(&self, bbox: &BoundingBox) -> Result<OverpassResponse, ProviderError> {
        let query = Self::build_query(bbox);
        let body = self
            .http_client
            .post_with_headers(&self.endpoint, query, &[], self.timeout)
            .await?;

        let response: OverpassResponse = serde_json::from_slice(&body)
            .map_err(|e| ProviderError::InvalidResponse(format!("Overpass JSON: {}", e)))?;

        debug!(
            bbox = %bbox,
            elements = response.elements.len(),
            "Overpass response decoded"
        );
        Ok(response)
    }

    fn name(&self) -> &str {
        "Overpass"
    }
}
