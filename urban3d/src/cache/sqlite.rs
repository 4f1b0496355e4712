//! SQLite-backed persistent cache.

use crate::cache::types::{CacheEntry, CacheError, CacheKey};
use crate::cache::Cache;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::trace;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS cache(
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL)";

/// One row per key, overwritten in place.
///
/// Each call opens its own short-lived connection; concurrent writers to the
/// same key rely on SQLite's isolation and the last write wins.
#[derive(Debug, Clone)]
pub struct SqliteCache {
    path: PathBuf,
}

impl SqliteCache {
    /// Opens (creating if needed) the cache database at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let cache = Self { path };
        cache.connect()?.execute(CREATE_TABLE, [])?;
        Ok(cache)
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, CacheError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Writes an entry keeping its own timestamp.
    pub fn put_entry(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        let value = serde_json::to_string(&entry.value)?;
        self.connect()?.execute(
            "INSERT OR REPLACE INTO cache(key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![entry.key.as_str(), value, entry.updated_at.to_rfc3339()],
        )?;
        trace!(key = %entry.key, bytes = value.len(), "Cache entry written");
        Ok(())
    }

    /// Reads an entry regardless of age.
    pub fn get_entry(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let row: Option<(String, String)> = self
            .connect()?
            .query_row(
                "SELECT value, updated_at FROM cache WHERE key = ?1",
                params![key.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((value, updated_at)) = row else {
            return Ok(None);
        };

        let corrupt = |reason: String| CacheError::Corrupt {
            key: key.to_string(),
            reason,
        };
        let updated_at = DateTime::parse_from_rfc3339(&updated_at)
            .map_err(|e| corrupt(format!("timestamp: {}", e)))?
            .with_timezone(&Utc);
        let value = serde_json::from_str(&value).map_err(|e| corrupt(format!("value: {}", e)))?;

        Ok(Some(CacheEntry::with_timestamp(key.clone(), value, updated_at)))
    }
}

impl Cache for SqliteCache {
    fn get(&self, key: &CacheKey, max_age: Duration) -> Result<Option<serde_json::Value>, CacheError> {
        Ok(self
            .get_entry(key)?
            .filter(|entry| entry.is_fresh(max_age, Utc::now()))
            .map(|entry| entry.value))
    }

    fn put(&self, key: &CacheKey, value: &serde_json::Value) -> Result<(), CacheError> {
        self.put_entry(&CacheEntry::new(key.clone(), value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn temp_cache() -> (TempDir, SqliteCache) {
        let dir = TempDir::new().unwrap();
        let cache = SqliteCache::new(dir.path().join("nested").join("cache.sqlite")).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_creates_parent_directories() {
        let (_dir, cache) = temp_cache();
        assert!(cache.path().exists());
    }

    #[test]
    fn test_put_then_get_roundtrip() {
        let (_dir, cache) = temp_cache();
        let key = CacheKey::new("b:1");
        let value = json!({"count": 1, "buildings": [{"id": 5}]});

        cache.put(&key, &value).unwrap();
        assert_eq!(cache.get(&key, Duration::from_secs(60)).unwrap(), Some(value));
    }

    #[test]
    fn test_missing_key_is_none() {
        let (_dir, cache) = temp_cache();
        assert!(cache.get(&CacheKey::new("nope"), Duration::MAX).unwrap().is_none());
    }

    #[test]
    fn test_stale_entry_needs_larger_threshold() {
        let (_dir, cache) = temp_cache();
        let key = CacheKey::new("b:stale");
        cache
            .put_entry(&CacheEntry::with_timestamp(
                key.clone(),
                json!({"count": 0}),
                Utc::now() - chrono::Duration::hours(8),
            ))
            .unwrap();

        assert!(cache.get(&key, Duration::from_secs(21_600)).unwrap().is_none());
        assert!(cache
            .get(&key, Duration::from_secs(365 * 24 * 60 * 60))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_overwrite_replaces_row_and_timestamp() {
        let (_dir, cache) = temp_cache();
        let key = CacheKey::new("b:1");
        cache
            .put_entry(&CacheEntry::with_timestamp(
                key.clone(),
                json!(1),
                Utc::now() - chrono::Duration::days(2),
            ))
            .unwrap();

        cache.put(&key, &json!(2)).unwrap();

        let entry = cache.get_entry(&key).unwrap().unwrap();
        assert_eq!(entry.value, json!(2));
        assert!(entry.is_fresh(Duration::from_secs(60), Utc::now()));

        let rows: i64 = Connection::open(cache.path())
            .unwrap()
            .query_row("SELECT COUNT(*) FROM cache", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.sqlite");
        let key = CacheKey::new("b:persist");

        SqliteCache::new(&path).unwrap().put(&key, &json!("kept")).unwrap();

        let reopened = SqliteCache::new(&path).unwrap();
        assert_eq!(reopened.get(&key, Duration::MAX).unwrap(), Some(json!("kept")));
    }

    #[test]
    fn test_corrupt_row_is_reported() {
        let (_dir, cache) = temp_cache();
        Connection::open(cache.path())
            .unwrap()
            .execute(
                "INSERT INTO cache(key, value, updated_at) VALUES ('b:bad', '{', 'yesterday')",
                [],
            )
            .unwrap();

        let err = cache.get(&CacheKey::new("b:bad"), Duration::MAX).unwrap_err();
        assert!(matches!(err, CacheError::Corrupt { .. }));
    }
}
