//! CLI runner for common setup and operations.
//!
//! Encapsulates configuration loading, logging initialization, service
//! creation and JSON output to reduce duplication across command handlers.

use crate::error::CliError;
use serde_json::Value;
use std::path::Path;
use tracing::info;
use urban3d::config::ConfigFile;
use urban3d::logging::{init_logging, split_log_path, LoggingGuard};
use urban3d::service::OverpassService;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// Log events go to the configured file. Stdout carries command output,
    /// so log mirroring there is opt-in.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Default to debug-level logging when RUST_LOG is unset
    /// * `log_stdout` - Mirror log events to stdout as well
    pub fn new(verbose: bool, log_stdout: bool) -> Result<Self, CliError> {
        let config = ConfigFile::load()?;

        let (log_dir, log_file) = split_log_path(&config.logging.file);
        let logging_guard = init_logging(&log_dir, &log_file, log_stdout, verbose)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("Urban3D v{}", urban3d::VERSION);
        info!("Urban3D CLI: {} command", command);
    }

    /// Create the Overpass-backed service from the loaded configuration.
    pub fn create_service(&self) -> Result<OverpassService, CliError> {
        OverpassService::from_config(&self.config)
            .map_err(CliError::ServiceCreation)
            .inspect(|_| info!("Service created successfully"))
    }

    /// Print `value` as pretty JSON, or write it to `output` when given.
    pub fn emit_json(&self, value: &Value, output: Option<&Path>) -> Result<(), CliError> {
        let text = serde_json::to_string_pretty(value)?;

        match output {
            Some(path) => {
                std::fs::write(path, text).map_err(|e| CliError::FileWrite {
                    path: path.to_path_buf(),
                    error: e,
                })?;
                info!("Output written to {}", path.display());
                println!("Saved: {}", path.display());
            }
            None => println!("{}", text),
        }

        Ok(())
    }
}

/// Read a file and parse it as JSON.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::FileRead {
        path: path.to_path_buf(),
        error: e,
    })?;
    Ok(serde_json::from_str(&text)?)
}
