//! Natural-language query command.

use clap::Args;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use urban3d::buildings::BuildingRecord;

use super::common::BboxArgs;
use crate::error::CliError;
use crate::runner::{read_json_file, CliRunner};

/// Arguments for `urban3d query`.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Query text, e.g. "buildings taller than 100 ft"
    pub text: String,

    #[command(flatten)]
    pub bbox: BboxArgs,

    /// Skip the fresh-cache check when fetching buildings
    #[arg(long)]
    pub refresh: bool,

    /// Evaluate against buildings from a JSON file instead of fetching
    #[arg(long, short, conflicts_with = "refresh")]
    pub input: Option<PathBuf>,

    /// Write the JSON result to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Extract a filter from the query text and print the matching ids.
pub async fn run(runner: &CliRunner, args: QueryArgs) -> Result<(), CliError> {
    runner.log_startup("query");

    let service = runner.create_service()?;

    let buildings = match &args.input {
        Some(path) => load_buildings(path)?,
        None => {
            let bbox = args.bbox.resolve(runner.config())?;
            service.buildings(bbox, args.refresh).await?.buildings
        }
    };

    let outcome = service.query(&args.text, &buildings).await;
    let mut value = serde_json::to_value(&outcome)?;
    value["count"] = json!(buildings.len());

    runner.emit_json(&value, args.output.as_deref())
}

/// Reads buildings from a file holding either a saved payload
/// (`{"buildings": [...]}`) or a bare list of records.
fn load_buildings(path: &Path) -> Result<Vec<BuildingRecord>, CliError> {
    let value = read_json_file(path)?;
    buildings_from_value(value)
}

fn buildings_from_value(value: Value) -> Result<Vec<BuildingRecord>, CliError> {
    let records = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => map.remove("buildings").ok_or_else(|| {
            CliError::InvalidInput("input JSON has no \"buildings\" field".to_string())
        })?,
        _ => {
            return Err(CliError::InvalidInput(
                "input JSON must be an object or an array".to_string(),
            ))
        }
    };
    Ok(serde_json::from_value(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Value {
        json!({
            "id": 1,
            "address": "N/A",
            "type": "office",
            "height_m": 36.0,
            "area_m2": 500.0,
            "levels": "12",
            "coords": [[51.0, -114.0], [51.0, -113.9], [51.1, -113.9], [51.0, -114.0]]
        })
    }

    #[test]
    fn test_payload_object_is_accepted() {
        let value = json!({"bbox": {}, "count": 1, "buildings": [record()]});
        let buildings = buildings_from_value(value).unwrap();
        assert_eq!(buildings.len(), 1);
        assert_eq!(buildings[0].building_type, "office");
    }

    #[test]
    fn test_bare_list_is_accepted() {
        let buildings = buildings_from_value(json!([record(), record()])).unwrap();
        assert_eq!(buildings.len(), 2);
    }

    #[test]
    fn test_object_without_buildings_is_rejected() {
        let err = buildings_from_value(json!({"count": 0})).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_scalar_is_rejected() {
        let err = buildings_from_value(json!(42)).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
