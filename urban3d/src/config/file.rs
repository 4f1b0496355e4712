//! Configuration file handling for ~/.urban3d/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::defaults::API_KEY_ENV;
use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.urban3d/config.ini),
    /// then apply environment overrides.
    ///
    /// If the file doesn't exist, defaults are used.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Ok(Self::load_from(&path)?.with_env_overrides())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Applies `HF_API_KEY` from the environment, if set.
    pub fn with_env_overrides(self) -> Self {
        let api_key = std::env::var(API_KEY_ENV).ok();
        self.with_api_key_override(api_key)
    }

    /// Replaces the text-generation credential with `api_key` when it is
    /// non-empty.
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key {
            let key = key.trim();
            if !key.is_empty() {
                self.text_generation.api_key = Some(key.to_string());
            }
        }
        self
    }

    /// Save configuration to the default path (~/.urban3d/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
        }
        Ok(path)
    }
}

/// Get the path to the config directory (~/.urban3d).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".urban3d")
}

/// Get the path to the config file (~/.urban3d/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.overpass.url, crate::provider::DEFAULT_OVERPASS_URL);
        assert_eq!(config.overpass.timeout, DEFAULT_OVERPASS_TIMEOUT_SECS);
        assert_eq!(config.overpass.retry_policy(), crate::acquisition::RetryPolicy::default());
        assert!(config.text_generation.api_key.is_none());
        assert_eq!(config.cache.fresh_max_age().as_secs(), 21600);
        assert_eq!(config.cache.stale_max_age().as_secs(), 31_536_000);
        assert_eq!(config.cache.database, config_directory().join("urban3d.sqlite"));
        assert_eq!(
            config.region.bbox(),
            crate::geometry::BoundingBox::new(-114.0715, 51.0455, -114.0665, 51.0493)
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp_dir.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.overpass.max_attempts = 4;
        config.overpass.backoff_secs = 1.5;
        config.text_generation.api_key = Some("hf_abc".to_string());
        config.cache.database = temp_dir.path().join("db.sqlite");
        config.region.west = -114.1;

        config.save_to(&config_path).unwrap();
        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_api_key_override() {
        let config = ConfigFile::default().with_api_key_override(Some(" hf_env ".to_string()));
        assert_eq!(config.text_generation.api_key.as_deref(), Some("hf_env"));

        let mut base = ConfigFile::default();
        base.text_generation.api_key = Some("from_file".to_string());
        let kept = base.clone().with_api_key_override(Some(String::new()));
        assert_eq!(kept.text_generation.api_key.as_deref(), Some("from_file"));
        let kept = base.with_api_key_override(None);
        assert_eq!(kept.text_generation.api_key.as_deref(), Some("from_file"));
    }

    #[test]
    fn test_huge_backoff_from_config_does_not_overflow() {
        let mut config = ConfigFile::default();
        config.overpass.backoff_secs = 1e19;

        let policy = config.overpass.retry_policy();
        assert_eq!(policy.delay_after(2), std::time::Duration::MAX);
    }
}
