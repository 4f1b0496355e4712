//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::provider::{DEFAULT_MAX_NEW_TOKENS, DEFAULT_OVERPASS_URL, DEFAULT_TEXT_GENERATION_URL};

/// Environment variable overriding `[text_generation] api_key`.
pub const API_KEY_ENV: &str = "HF_API_KEY";

/// Default Overpass request timeout in seconds.
pub const DEFAULT_OVERPASS_TIMEOUT_SECS: u64 = 70;

/// Default attempts per live fetch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base backoff in seconds.
pub const DEFAULT_BACKOFF_SECS: f64 = 2.0;

/// Default text-generation timeout in seconds.
pub const DEFAULT_TEXT_GENERATION_TIMEOUT_SECS: u64 = 60;

/// Default fresh threshold: 6 hours.
pub const DEFAULT_FRESH_MAX_AGE_SECS: u64 = 6 * 60 * 60;

/// Default stale threshold: 365 days.
pub const DEFAULT_STALE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

/// Default region: a few blocks of downtown Calgary.
pub const DEFAULT_REGION_WEST: f64 = -114.0715;
pub const DEFAULT_REGION_SOUTH: f64 = 51.0455;
pub const DEFAULT_REGION_EAST: f64 = -114.0665;
pub const DEFAULT_REGION_NORTH: f64 = 51.0493;

/// Default database path (~/.urban3d/urban3d.sqlite).
pub fn default_database_path() -> PathBuf {
    config_directory().join("urban3d.sqlite")
}

/// Default log file path (~/.urban3d/urban3d.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join("urban3d.log")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            overpass: OverpassSettings {
                url: DEFAULT_OVERPASS_URL.to_string(),
                timeout: DEFAULT_OVERPASS_TIMEOUT_SECS,
                max_attempts: DEFAULT_MAX_ATTEMPTS,
                backoff_secs: DEFAULT_BACKOFF_SECS,
            },
            text_generation: TextGenerationSettings {
                url: DEFAULT_TEXT_GENERATION_URL.to_string(),
                api_key: None,
                timeout: DEFAULT_TEXT_GENERATION_TIMEOUT_SECS,
                max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            },
            cache: CacheSettings {
                database: default_database_path(),
                fresh_max_age: DEFAULT_FRESH_MAX_AGE_SECS,
                stale_max_age: DEFAULT_STALE_MAX_AGE_SECS,
            },
            region: RegionSettings {
                west: DEFAULT_REGION_WEST,
                south: DEFAULT_REGION_SOUTH,
                east: DEFAULT_REGION_EAST,
                north: DEFAULT_REGION_NORTH,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
