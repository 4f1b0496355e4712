//! urban3d service facade implementation.

use super::error::ServiceError;
use crate::acquisition::{AcquisitionPipeline, FetchOutcome};
use crate::buildings::BuildingRecord;
use crate::cache::SqliteCache;
use crate::config::ConfigFile;
use crate::filter::{apply_filter, FilterExpression, FilterParser};
use crate::geometry::BoundingBox;
use crate::projects::ProjectStore;
use crate::provider::{
    AsyncReqwestClient, GeodataSource, OverpassProvider, TextGenerationProvider,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Reason reported when no filter could be read from a query.
pub const UNPARSED_QUERY_REASON: &str = "Could not parse a filter from the query.";

/// Result of a natural-language query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub filter: Option<FilterExpression>,
    pub matching_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Service wired against the public Overpass API.
pub type OverpassService = Urban3dService<OverpassProvider<AsyncReqwestClient>>;

/// High-level facade over acquisition, filtering and saved projects.
///
/// # Example
///
/// ```ignore
/// use urban3d::config::ConfigFile;
/// use urban3d::service::OverpassService;
///
/// let config = ConfigFile::load()?;
/// let service = OverpassService::from_config(&config)?;
///
/// let outcome = service.buildings(config.region.bbox(), false).await?;
/// let result = service.query("height > 100 ft", &outcome.buildings).await;
/// ```
pub struct Urban3dService<S: GeodataSource> {
    pipeline: AcquisitionPipeline<S>,
    parser: FilterParser,
    projects: ProjectStore,
}

impl OverpassService {
    /// Wires the service from configuration.
    ///
    /// The cache and project store share the configured database. The
    /// text-generation fallback is enabled only when a credential is set.
    pub fn from_config(config: &ConfigFile) -> Result<Self, ServiceError> {
        let http_client = AsyncReqwestClient::shared()?;

        let source = OverpassProvider::with_endpoint(http_client.clone(), &config.overpass.url)
            .with_timeout(config.overpass.timeout());
        let cache = Arc::new(SqliteCache::new(&config.cache.database)?);
        let pipeline = AcquisitionPipeline::new(source, cache)
            .with_retry_policy(config.overpass.retry_policy())
            .with_fresh_max_age(config.cache.fresh_max_age())
            .with_stale_max_age(config.cache.stale_max_age());

        let mut parser = FilterParser::new();
        if let Some(api_key) = &config.text_generation.api_key {
            let generator = TextGenerationProvider::new(http_client, api_key.as_str())
                .with_endpoint(&config.text_generation.url)
                .with_timeout(config.text_generation.timeout())
                .with_max_new_tokens(config.text_generation.max_new_tokens);
            parser = parser.with_fallback(Arc::new(generator));
        }

        let projects = ProjectStore::new(&config.cache.database)?;

        info!(
            database = %config.cache.database.display(),
            overpass = %config.overpass.url,
            fallback = parser.has_fallback(),
            "urban3d service initialized"
        );

        Ok(Self::new(pipeline, parser, projects))
    }
}

impl<S: GeodataSource> Urban3dService<S> {
    /// Assembles a service from already-built parts.
    pub fn new(pipeline: AcquisitionPipeline<S>, parser: FilterParser, projects: ProjectStore) -> Self {
        Self {
            pipeline,
            parser,
            projects,
        }
    }

    /// Buildings inside `bbox`, from cache or live.
    pub async fn buildings(
        &self,
        bbox: BoundingBox,
        refresh: bool,
    ) -> Result<FetchOutcome, ServiceError> {
        Ok(self.pipeline.fetch(bbox, refresh).await?)
    }

    /// Extracts a filter from `text` and evaluates it over `buildings`.
    pub async fn query(&self, text: &str, buildings: &[BuildingRecord]) -> QueryOutcome {
        let Some(filter) = self.parser.extract(text).await else {
            info!(query = text, "No filter extracted");
            return QueryOutcome {
                filter: None,
                matching_ids: Vec::new(),
                reason: Some(UNPARSED_QUERY_REASON.to_string()),
            };
        };

        let matching_ids = apply_filter(buildings, Some(&filter));
        info!(
            query = text,
            filter = %filter,
            matches = matching_ids.len(),
            "Query evaluated"
        );
        QueryOutcome {
            filter: Some(filter),
            matching_ids,
            reason: None,
        }
    }

    pub fn parser(&self) -> &FilterParser {
        &self.parser
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }
}
