//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`buildings`] - Fetch buildings for a bounding box
//! - [`config`] - Configuration management (init, path, show)
//! - [`projects`] - Saved filter sets (save, list, load, delete)
//! - [`query`] - Natural-language filter queries

pub mod buildings;
pub mod common;
pub mod config;
pub mod projects;
pub mod query;
