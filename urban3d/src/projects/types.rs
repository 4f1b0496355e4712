//! Saved project types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Listing row for a saved project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Project store errors.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// A required input was empty after trimming
    #[error("{0} is required")]
    MissingField(&'static str),

    /// No project with this id
    #[error("project {0} not found")]
    NotFound(i64),

    /// No user with this name
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Stored row could not be decoded
    #[error("corrupt project {id}: {reason}")]
    Corrupt { id: i64, reason: String },

    #[error("Project store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Project database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Project encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
