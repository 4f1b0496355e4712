//! Cache trait definition for dependency injection.

use crate::cache::types::{CacheError, CacheKey};
use std::time::Duration;

/// Keyed, timestamped JSON store.
///
/// Every read supplies its own freshness threshold, so the same entry can be
/// "stale" for one caller and usable for another.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use urban3d::cache::{Cache, CacheKey, MemoryCache};
///
/// let cache = MemoryCache::new();
/// let key = CacheKey::new("b:demo");
///
/// cache.put(&key, &serde_json::json!({"count": 0})).unwrap();
/// assert!(cache.get(&key, Duration::from_secs(60)).unwrap().is_some());
/// ```
pub trait Cache: Send + Sync {
    /// Returns the value stored under `key` if it is no older than `max_age`.
    fn get(&self, key: &CacheKey, max_age: Duration) -> Result<Option<serde_json::Value>, CacheError>;

    /// Stores `value` under `key`, replacing any existing entry and
    /// resetting its timestamp.
    fn put(&self, key: &CacheKey, value: &serde_json::Value) -> Result<(), CacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use std::sync::Arc;

    #[test]
    fn test_cache_as_shared_trait_object() {
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
        let key = CacheKey::new("k");

        cache.put(&key, &serde_json::json!([1, 2])).unwrap();
        let value = cache.get(&key, Duration::from_secs(1)).unwrap();
        assert_eq!(value, Some(serde_json::json!([1, 2])));
    }

    #[test]
    fn test_cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Cache>();
    }
}
