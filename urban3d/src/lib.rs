//! urban3d - Building footprints and natural-language filters
//!
//! This library fetches OpenStreetMap building footprints for a bounding box,
//! derives per-building height, area and type, caches the result, and answers
//! free-text filter queries ("height > 100 ft", "commercial buildings")
//! against it.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use urban3d::config::ConfigFile;
//! use urban3d::service::OverpassService;
//!
//! let config = ConfigFile::load()?;
//! let service = OverpassService::from_config(&config)?;
//!
//! let outcome = service.buildings(config.region.bbox(), false).await?;
//! let result = service.query("over 20 floors", &outcome.buildings).await;
//! println!("{:?}", result.matching_ids);
//! ```

pub mod acquisition;
pub mod buildings;
pub mod cache;
pub mod config;
pub mod filter;
pub mod geometry;
pub mod logging;
pub mod projects;
pub mod provider;
pub mod service;

/// Version of the urban3d library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
