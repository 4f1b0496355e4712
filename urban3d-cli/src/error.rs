//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;
use urban3d::acquisition::AcquisitionError;
use urban3d::config::{ConfigFileError, API_KEY_ENV};
use urban3d::projects::ProjectError;
use urban3d::service::ServiceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create service
    ServiceCreation(ServiceError),
    /// Building acquisition failed
    Acquisition(ServiceError),
    /// Saved project operation failed
    Project(ProjectError),
    /// Failed to read an input file
    FileRead { path: PathBuf, error: std::io::Error },
    /// Failed to write output file
    FileWrite { path: PathBuf, error: std::io::Error },
    /// Malformed JSON input
    Json(serde_json::Error),
    /// Invalid command-line input
    InvalidInput(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Acquisition(ServiceError::AcquisitionError(AcquisitionError::Upstream(_))) => {
                eprintln!();
                eprintln!("The geodata service did not answer and no cached copy exists.");
                eprintln!("  1. Try a smaller bounding box");
                eprintln!("  2. Check [overpass] url in config.ini");
                eprintln!("  3. Retry later; the public endpoint rate-limits heavy use");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Run 'urban3d config init' to write a default configuration.");
                eprintln!(
                    "The text-generation key can also be supplied via {}.",
                    API_KEY_ENV
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::ServiceCreation(e) => write!(f, "Failed to create service: {}", e),
            CliError::Acquisition(e) => write!(f, "Failed to fetch buildings: {}", e),
            CliError::Project(e) => write!(f, "Project error: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path.display(), error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::InvalidInput(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::ServiceCreation(e) => Some(e),
            CliError::Acquisition(e) => Some(e),
            CliError::Project(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ServiceError> for CliError {
    fn from(e: ServiceError) -> Self {
        CliError::Acquisition(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ProjectError> for CliError {
    fn from(e: ProjectError) -> Self {
        CliError::Project(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}
