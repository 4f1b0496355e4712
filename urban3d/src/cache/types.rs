//! Core types for the cache system.

use crate::geometry::BoundingBox;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Cache key identifying one cached payload.
///
/// Building payloads are keyed by the bounding box rounded to five decimal
/// places (about one meter), so boxes that differ only further out share an
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Create a key from an arbitrary string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Canonical key for the buildings inside `bbox`.
    pub fn for_bbox(bbox: &BoundingBox) -> Self {
        Self(format!(
            "b:{:.5},{:.5},{:.5},{:.5}",
            bbox.west, bbox.south, bbox.east, bbox.north
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stored value with its write time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: CacheKey,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create an entry stamped with the current time.
    pub fn new(key: CacheKey, value: serde_json::Value) -> Self {
        Self::with_timestamp(key, value, Utc::now())
    }

    pub fn with_timestamp(key: CacheKey, value: serde_json::Value, updated_at: DateTime<Utc>) -> Self {
        Self {
            key,
            value,
            updated_at,
        }
    }

    /// An entry is fresh while its age does not exceed `max_age`.
    pub fn is_fresh(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.updated_at);
        match chrono::Duration::from_std(max_age) {
            Ok(max_age) => age <= max_age,
            // Larger than chrono can represent: nothing is that old.
            Err(_) => true,
        }
    }
}

/// Cache-related errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error during cache operations
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing database failed
    #[error("Cache database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored value or timestamp could not be decoded
    #[error("Corrupt cache entry for {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Value could not be encoded for storage
    #[error("Cache encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failed to acquire lock
    #[error("Failed to acquire cache lock")]
    LockError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_key_uses_five_decimals() {
        let bbox = BoundingBox::new(-114.0715, 51.0455, -114.0665, 51.0493);
        assert_eq!(
            CacheKey::for_bbox(&bbox).as_str(),
            "b:-114.07150,51.04550,-114.06650,51.04930"
        );
    }

    #[test]
    fn test_bbox_key_ignores_sixth_decimal_noise() {
        let a = BoundingBox::new(-114.0715, 51.0455, -114.0665, 51.0493);
        let b = BoundingBox::new(-114.071500001, 51.045500002, -114.066499999, 51.049300003);
        assert_eq!(CacheKey::for_bbox(&a), CacheKey::for_bbox(&b));
    }

    #[test]
    fn test_bbox_key_distinguishes_fifth_decimal() {
        let a = BoundingBox::new(-114.0715, 51.0455, -114.0665, 51.0493);
        let b = BoundingBox::new(-114.0716, 51.0455, -114.0665, 51.0493);
        assert_ne!(CacheKey::for_bbox(&a), CacheKey::for_bbox(&b));
    }

    #[test]
    fn test_freshness_boundary_is_inclusive() {
        let now = Utc::now();
        let entry = CacheEntry::with_timestamp(
            CacheKey::new("k"),
            serde_json::json!({}),
            now - chrono::Duration::seconds(60),
        );

        assert!(entry.is_fresh(Duration::from_secs(60), now));
        assert!(entry.is_fresh(Duration::from_secs(61), now));
        assert!(!entry.is_fresh(Duration::from_secs(59), now));
    }

    #[test]
    fn test_huge_max_age_is_always_fresh() {
        let now = Utc::now();
        let entry = CacheEntry::with_timestamp(
            CacheKey::new("k"),
            serde_json::json!(null),
            now - chrono::Duration::days(3650),
        );
        assert!(entry.is_fresh(Duration::MAX, now));
    }
}
