//! Service error types.

use crate::acquisition::AcquisitionError;
use crate::cache::CacheError;
use crate::projects::ProjectError;
use crate::provider::ProviderError;
use std::fmt;

/// Errors that can occur during service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Failed to create HTTP client
    HttpClientError(ProviderError),
    /// Failed to open the cache database
    CacheError(CacheError),
    /// Failed to open or use the project store
    ProjectError(ProjectError),
    /// Building acquisition failed with no usable cache entry
    AcquisitionError(AcquisitionError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpClientError(e) => write!(f, "HTTP client error: {}", e),
            Self::CacheError(e) => write!(f, "Cache error: {}", e),
            Self::ProjectError(e) => write!(f, "Project error: {}", e),
            // Surfaced verbatim so the upstream message reaches the caller.
            Self::AcquisitionError(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClientError(e) => Some(e),
            Self::CacheError(e) => Some(e),
            Self::ProjectError(e) => Some(e),
            Self::AcquisitionError(e) => Some(e),
        }
    }
}

impl From<ProviderError> for ServiceError {
    fn from(e: ProviderError) -> Self {
        Self::HttpClientError(e)
    }
}

impl From<CacheError> for ServiceError {
    fn from(e: CacheError) -> Self {
        Self::CacheError(e)
    }
}

impl From<ProjectError> for ServiceError {
    fn from(e: ProjectError) -> Self {
        Self::ProjectError(e)
    }
}

impl From<AcquisitionError> for ServiceError {
    fn from(e: AcquisitionError) -> Self {
        Self::AcquisitionError(e)
    }
}
