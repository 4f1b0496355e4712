//! Application configuration
//!
//! User settings live in `~/.urban3d/config.ini`:
//!
//! - `[overpass]`: geodata endpoint, timeout and retry budget
//! - `[text_generation]`: optional fallback model and credential
//! - `[cache]`: database path and freshness thresholds
//! - `[region]`: default bounding box
//! - `[logging]`: log file
//!
//! # Example
//!
//! ```
//! use urban3d::config::ConfigFile;
//!
//! let config = ConfigFile::default();
//! assert_eq!(config.overpass.max_attempts, 3);
//! assert_eq!(config.cache.fresh_max_age, 21600);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    CacheSettings, ConfigFile, LoggingSettings, OverpassSettings, RegionSettings,
    TextGenerationSettings,
};
