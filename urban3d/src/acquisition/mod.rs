//! Building acquisition pipeline
//!
//! Cache lookup → live fetch with linear backoff → geometry derivation →
//! cache write, degrading to a stale cache entry when the live path fails.
//!
//! ```ignore
//! use std::sync::Arc;
//! use urban3d::acquisition::AcquisitionPipeline;
//! use urban3d::cache::SqliteCache;
//! use urban3d::provider::{AsyncReqwestClient, OverpassProvider};
//!
//! let source = OverpassProvider::new(AsyncReqwestClient::shared()?);
//! let pipeline = AcquisitionPipeline::new(source, Arc::new(SqliteCache::new("cache.sqlite")?));
//! let outcome = pipeline.fetch(bbox, false).await?;
//! println!("{} buildings from {}", outcome.count, outcome.source);
//! ```

mod pipeline;
mod retry;
mod types;

pub use pipeline::{AcquisitionPipeline, DEFAULT_FRESH_MAX_AGE, DEFAULT_STALE_MAX_AGE};
pub use retry::{RetryPolicy, DEFAULT_BACKOFF, DEFAULT_MAX_ATTEMPTS};
pub use types::{AcquisitionError, DataSource, FetchOutcome};
