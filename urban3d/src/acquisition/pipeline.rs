//! Cache-first building acquisition with retry and stale fallback.

use super::retry::RetryPolicy;
use super::types::{AcquisitionError, DataSource, FetchOutcome};
use crate::buildings::{assemble_buildings, BuildingsPayload};
use crate::cache::{Cache, CacheKey};
use crate::geometry::BoundingBox;
use crate::provider::{GeodataSource, OverpassResponse, ProviderError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Maximum age of a cache entry served without a live fetch (6 hours).
pub const DEFAULT_FRESH_MAX_AGE: Duration = Duration::from_secs(6 * 60 * 60);

/// Maximum age of a cache entry served after a failed live fetch (1 year).
pub const DEFAULT_STALE_MAX_AGE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Orchestrates cache lookup, live fetch, geometry derivation and cache write.
///
/// The check-then-fetch-then-write sequence takes no lock: two concurrent
/// forced refreshes of the same box both go upstream and the later write wins.
pub struct AcquisitionPipeline<S: GeodataSource> {
    source: S,
    cache: Arc<dyn Cache>,
    retry: RetryPolicy,
    fresh_max_age: Duration,
    stale_max_age: Duration,
}

impl<S: GeodataSource> AcquisitionPipeline<S> {
    pub fn new(source: S, cache: Arc<dyn Cache>) -> Self {
        Self {
            source,
            cache,
            retry: RetryPolicy::default(),
            fresh_max_age: DEFAULT_FRESH_MAX_AGE,
            stale_max_age: DEFAULT_STALE_MAX_AGE,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_fresh_max_age(mut self, max_age: Duration) -> Self {
        self.fresh_max_age = max_age;
        self
    }

    pub fn with_stale_max_age(mut self, max_age: Duration) -> Self {
        self.stale_max_age = max_age;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns the buildings inside `bbox`.
    ///
    /// 1. Unless `force_refresh`, a cache entry younger than the fresh
    ///    threshold is returned as [`DataSource::Cache`].
    /// 2. Otherwise the geodata source is queried with retry, the records are
    ///    derived, written to the cache and returned as [`DataSource::Live`].
    /// 3. If any part of step 2 fails, an entry younger than the stale
    ///    threshold is returned as [`DataSource::StaleCache`] with a warning;
    ///    without one, the failure is returned.
    pub async fn fetch(
        &self,
        bbox: BoundingBox,
        force_refresh: bool,
    ) -> Result<FetchOutcome, AcquisitionError> {
        let key = CacheKey::for_bbox(&bbox);

        if !force_refresh {
            if let Some(payload) = self.read_cache(&key, self.fresh_max_age) {
                info!(key = %key, count = payload.count, "Serving buildings from cache");
                return Ok(FetchOutcome::from_payload(payload, DataSource::Cache));
            }
        }

        match self.fetch_live(&bbox, &key).await {
            Ok(payload) => {
                info!(key = %key, count = payload.count, "Serving live buildings");
                Ok(FetchOutcome::from_payload(payload, DataSource::Live))
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Live fetch failed");
                match self.read_cache(&key, self.stale_max_age) {
                    Some(payload) => {
                        info!(key = %key, count = payload.count, "Serving stale buildings");
                        Ok(FetchOutcome::from_payload(payload, DataSource::StaleCache)
                            .with_warning(format!("live fetch failed: {}", err)))
                    }
                    None => Err(err),
                }
            }
        }
    }

    async fn fetch_live(
        &self,
        bbox: &BoundingBox,
        key: &CacheKey,
    ) -> Result<BuildingsPayload, AcquisitionError> {
        let response = self.fetch_with_retry(bbox).await?;
        let payload = BuildingsPayload::new(*bbox, assemble_buildings(bbox, &response));

        let value = serde_json::to_value(&payload)?;
        self.cache.put(key, &value)?;
        Ok(payload)
    }

    /// Queries the source up to `max_attempts` times.
    ///
    /// Every failed attempt, the last included, is followed by a sleep of
    /// `backoff * attempt` before the next attempt or the final error.
    async fn fetch_with_retry(&self, bbox: &BoundingBox) -> Result<OverpassResponse, ProviderError> {
        let mut last_error = None;

        for attempt in 1..=self.retry.max_attempts() {
            debug!(
                source = self.source.name(),
                attempt = attempt,
                max_attempts = self.retry.max_attempts(),
                "Fetching buildings"
            );

            match self.source.fetch_buildings(bbox).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    let delay = self.retry.delay_after(attempt);
                    warn!(
                        source = self.source.name(),
                        attempt = attempt,
                        transient = err.is_transient_status(),
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Fetch attempt failed, backing off"
                    );
                    last_error = Some(err);
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ProviderError::HttpError("no fetch attempt was made".to_string())))
    }

    /// Reads and decodes a cached payload; unreadable entries count as misses.
    fn read_cache(&self, key: &CacheKey, max_age: Duration) -> Option<BuildingsPayload> {
        let value = match self.cache.get(key, max_age) {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key = %key, max_age_secs = max_age.as_secs(), "Cache miss");
                return None;
            }
            Err(err) => {
                warn!(key = %key, error = %err, "Cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(payload) => Some(payload),
            Err(err) => {
                warn!(key = %key, error = %err, "Cached payload undecodable, treating as miss");
                None
            }
        }
    }
}
