//! Provider types and traits

use std::fmt;

/// Errors that can occur during provider operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// HTTP request failed before a status was received
    HttpError(String),
    /// Upstream answered with a non-success status
    HttpStatus { status: u16, url: String },
    /// Invalid response data from provider
    InvalidResponse(String),
}

impl ProviderError {
    /// Returns true for statuses that signal a transient upstream condition
    /// (rate limiting or server-side failure).
    pub fn is_transient_status(&self) -> bool {
        matches!(
            self,
            ProviderError::HttpStatus {
                status: 429 | 500 | 502 | 503 | 504,
                ..
            }
        )
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            ProviderError::HttpStatus { status, url } => {
                write!(f, "HTTP {} from {}", status, url)
            }
            ProviderError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses() {
        for status in [429, 500, 502, 503, 504] {
            let err = ProviderError::HttpStatus {
                status,
                url: "http://example.com".to_string(),
            };
            assert!(err.is_transient_status(), "{} should be transient", status);
        }

        let not_found = ProviderError::HttpStatus {
            status: 404,
            url: "http://example.com".to_string(),
        };
        assert!(!not_found.is_transient_status());
        assert!(!ProviderError::HttpError("reset".to_string()).is_transient_status());
    }

    #[test]
    fn test_display_embeds_status() {
        let err = ProviderError::HttpStatus {
            status: 503,
            url: "https://overpass-api.de/api/interpreter".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 from https://overpass-api.de/api/interpreter"
        );
    }
}
