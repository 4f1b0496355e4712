//! In-process cache.

use crate::cache::types::{CacheEntry, CacheError, CacheKey};
use crate::cache::Cache;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Cache held in a map behind a mutex.
///
/// Nothing survives the process; useful for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a pre-built entry, keeping its timestamp.
    pub fn insert_entry(&self, entry: CacheEntry) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::LockError)?;
        entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &CacheKey, max_age: Duration) -> Result<Option<serde_json::Value>, CacheError> {
        let entries = self.entries.lock().map_err(|_| CacheError::LockError)?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.is_fresh(max_age, Utc::now()))
            .map(|entry| entry.value.clone()))
    }

    fn put(&self, key: &CacheKey, value: &serde_json::Value) -> Result<(), CacheError> {
        self.insert_entry(CacheEntry::new(key.clone(), value.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_then_get() {
        let cache = MemoryCache::new();
        let key = CacheKey::new("b:1");

        cache.put(&key, &json!({"count": 2})).unwrap();
        assert_eq!(
            cache.get(&key, Duration::from_secs(10)).unwrap(),
            Some(json!({"count": 2}))
        );
    }

    #[test]
    fn test_old_entry_respects_threshold() {
        let cache = MemoryCache::new();
        let key = CacheKey::new("b:old");
        cache
            .insert_entry(CacheEntry::with_timestamp(
                key.clone(),
                json!("old"),
                Utc::now() - chrono::Duration::hours(7),
            ))
            .unwrap();

        assert!(cache.get(&key, Duration::from_secs(6 * 3600)).unwrap().is_none());
        assert_eq!(
            cache.get(&key, Duration::from_secs(365 * 24 * 3600)).unwrap(),
            Some(json!("old"))
        );
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let cache = MemoryCache::new();
        let key = CacheKey::new("b:1");

        cache.put(&key, &json!(1)).unwrap();
        cache.put(&key, &json!(2)).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key, Duration::MAX).unwrap(), Some(json!(2)));
    }

    #[test]
    fn test_missing_key() {
        let cache = MemoryCache::new();
        assert!(cache.is_empty());
        assert!(cache.get(&CacheKey::new("nope"), Duration::MAX).unwrap().is_none());
    }
}
