//! Keyed, timestamped JSON cache.
//!
//! Provides a persistent SQLite store for fetched building payloads plus an
//! in-memory implementation behind the same [`Cache`] trait.

mod memory;
mod sqlite;
mod r#trait;
mod types;

pub use memory::MemoryCache;
pub use r#trait::Cache;
pub use sqlite::SqliteCache;
pub use types::{CacheEntry, CacheError, CacheKey};
