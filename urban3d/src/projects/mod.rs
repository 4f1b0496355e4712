//! Saved projects: named filter sets per user, stored in SQLite.

mod store;
mod types;

pub use store::ProjectStore;
pub use types::{ProjectError, ProjectSummary};
