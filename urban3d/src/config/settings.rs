//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use crate::acquisition::{RetryPolicy, DEFAULT_BACKOFF};
use crate::geometry::BoundingBox;
use std::path::PathBuf;
use std::time::Duration;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Geodata service settings
    pub overpass: OverpassSettings,
    /// Text-generation fallback settings
    pub text_generation: TextGenerationSettings,
    /// Cache database and freshness thresholds
    pub cache: CacheSettings,
    /// Default query region
    pub region: RegionSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Overpass geodata service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OverpassSettings {
    /// Interpreter endpoint URL
    pub url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Attempts per live fetch
    pub max_attempts: u32,
    /// Base backoff in seconds; attempt `n` waits `n * backoff_secs`
    pub backoff_secs: f64,
}

impl OverpassSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let backoff = Duration::try_from_secs_f64(self.backoff_secs).unwrap_or(DEFAULT_BACKOFF);
        RetryPolicy::new(self.max_attempts, backoff)
    }
}

/// Hosted text-generation configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TextGenerationSettings {
    /// Model inference URL
    pub url: String,
    /// Bearer credential; the fallback is disabled without one
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Generation budget per request
    pub max_new_tokens: u32,
}

impl TextGenerationSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// SQLite database shared by the cache and saved projects
    pub database: PathBuf,
    /// Age in seconds under which a cached payload is served without a fetch
    pub fresh_max_age: u64,
    /// Age in seconds under which a cached payload may stand in for a failed fetch
    pub stale_max_age: u64,
}

impl CacheSettings {
    pub fn fresh_max_age(&self) -> Duration {
        Duration::from_secs(self.fresh_max_age)
    }

    pub fn stale_max_age(&self) -> Duration {
        Duration::from_secs(self.stale_max_age)
    }
}

/// Region used when no bounding box is given.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSettings {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl RegionSettings {
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.west, self.south, self.east, self.north)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
