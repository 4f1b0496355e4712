//! SQLite persistence of named filter sets.

use super::types::{ProjectError, ProjectSummary};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL)";

const CREATE_PROJECTS: &str = "CREATE TABLE IF NOT EXISTS projects(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    filters_json TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY(user_id) REFERENCES users(id))";

/// Filter sets saved under a user and project name.
///
/// Filters are opaque JSON; they come back from [`load`](Self::load)
/// exactly as they were saved. Like the cache, every call opens its own
/// connection, so the store can share a database file with it.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// Opens (creating if needed) the project tables in the database at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ProjectError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let store = Self { path };
        let conn = store.connect()?;
        conn.execute(CREATE_USERS, [])?;
        conn.execute(CREATE_PROJECTS, [])?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, ProjectError> {
        Ok(Connection::open(&self.path)?)
    }

    /// Saves `filters` as a new project, creating the user on first use.
    ///
    /// Returns the new project id.
    pub fn save(
        &self,
        username: &str,
        project_name: &str,
        filters: &[Value],
    ) -> Result<i64, ProjectError> {
        let username = required(username, "username")?;
        let project_name = required(project_name, "project_name")?;
        let filters_json = serde_json::to_string(filters)?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT OR IGNORE INTO users(username) VALUES (?1)",
            params![username],
        )?;
        let user_id: i64 = tx.query_row(
            "SELECT id FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )?;
        tx.execute(
            "INSERT INTO projects(user_id, name, filters_json, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![user_id, project_name, filters_json, Utc::now().to_rfc3339()],
        )?;
        let project_id = tx.last_insert_rowid();
        tx.commit()?;

        info!(
            username = username,
            project = project_name,
            project_id = project_id,
            filters = filters.len(),
            "Project saved"
        );
        Ok(project_id)
    }

    /// Projects of `username`, newest first. Unknown or empty users have none.
    pub fn list(&self, username: &str) -> Result<Vec<ProjectSummary>, ProjectError> {
        let username = username.trim();
        if username.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.connect()?;
        let Some(user_id) = find_user(&conn, username)? else {
            debug!(username = username, "No projects for unknown user");
            return Ok(Vec::new());
        };

        let mut stmt = conn.prepare(
            "SELECT id, name, created_at FROM projects WHERE user_id = ?1 ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut projects = Vec::new();
        for row in rows {
            let (id, name, created_at) = row?;
            projects.push(ProjectSummary {
                id,
                name,
                created_at: parse_timestamp(id, &created_at)?,
            });
        }
        Ok(projects)
    }

    /// Filters saved under `project_id`.
    pub fn load(&self, project_id: i64) -> Result<Vec<Value>, ProjectError> {
        let filters_json: Option<String> = self
            .connect()?
            .query_row(
                "SELECT filters_json FROM projects WHERE id = ?1",
                params![project_id],
                |row| row.get(0),
            )
            .optional()?;

        let filters_json = filters_json.ok_or(ProjectError::NotFound(project_id))?;
        serde_json::from_str(&filters_json).map_err(|e| ProjectError::Corrupt {
            id: project_id,
            reason: e.to_string(),
        })
    }

    /// Deletes `project_id` if `username` owns it.
    ///
    /// Returns the number of projects removed (0 or 1).
    pub fn delete(&self, username: &str, project_id: i64) -> Result<usize, ProjectError> {
        let username = required(username, "username")?;

        let conn = self.connect()?;
        let user_id = find_user(&conn, username)?
            .ok_or_else(|| ProjectError::UserNotFound(username.to_string()))?;

        let deleted = conn.execute(
            "DELETE FROM projects WHERE id = ?1 AND user_id = ?2",
            params![project_id, user_id],
        )?;
        info!(
            username = username,
            project_id = project_id,
            deleted = deleted,
            "Project delete"
        );
        Ok(deleted)
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ProjectError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ProjectError::MissingField(field));
    }
    Ok(value)
}

fn find_user(conn: &Connection, username: &str) -> Result<Option<i64>, ProjectError> {
    Ok(conn
        .query_row(
            "SELECT id FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )
        .optional()?)
}

fn parse_timestamp(id: i64, value: &str) -> Result<DateTime<Utc>, ProjectError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ProjectError::Corrupt {
            id,
            reason: format!("created_at: {}", e),
        })
}
