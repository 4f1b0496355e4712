//! Common types and utilities shared across CLI commands.

use clap::Args;
use urban3d::config::ConfigFile;
use urban3d::geometry::BoundingBox;

use crate::error::CliError;

/// Bounding box arguments; any edge left out comes from `[region]`.
#[derive(Debug, Clone, Default, Args)]
pub struct BboxArgs {
    /// Western longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub west: Option<f64>,

    /// Southern latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub south: Option<f64>,

    /// Eastern longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub east: Option<f64>,

    /// Northern latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub north: Option<f64>,
}

impl BboxArgs {
    /// Resolves the box against the configured default region.
    pub fn resolve(&self, config: &ConfigFile) -> Result<BoundingBox, CliError> {
        let region = config.region.bbox();
        let bbox = BoundingBox::new(
            self.west.unwrap_or(region.west),
            self.south.unwrap_or(region.south),
            self.east.unwrap_or(region.east),
            self.north.unwrap_or(region.north),
        );

        if ![bbox.west, bbox.south, bbox.east, bbox.north]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(CliError::InvalidInput(
                "bounding box edges must be finite numbers".to_string(),
            ));
        }
        if bbox.west >= bbox.east {
            return Err(CliError::InvalidInput(format!(
                "west ({}) must be less than east ({})",
                bbox.west, bbox.east
            )));
        }
        if bbox.south >= bbox.north {
            return Err(CliError::InvalidInput(format!(
                "south ({}) must be less than north ({})",
                bbox.south, bbox.north
            )));
        }

        Ok(bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_use_configured_region() {
        let config = ConfigFile::default();
        let bbox = BboxArgs::default().resolve(&config).unwrap();
        assert_eq!(bbox, config.region.bbox());
    }

    #[test]
    fn test_explicit_edges_override_region() {
        let config = ConfigFile::default();
        let args = BboxArgs {
            west: Some(-114.08),
            south: Some(51.04),
            east: Some(-114.06),
            north: Some(51.05),
        };
        let bbox = args.resolve(&config).unwrap();
        assert_eq!(bbox, BoundingBox::new(-114.08, 51.04, -114.06, 51.05));
    }

    #[test]
    fn test_inverted_box_is_rejected() {
        let config = ConfigFile::default();
        let args = BboxArgs {
            west: Some(-114.0),
            east: Some(-115.0),
            ..Default::default()
        };
        let err = args.resolve(&config).unwrap_err();
        assert!(err.to_string().contains("west"));
    }
}
