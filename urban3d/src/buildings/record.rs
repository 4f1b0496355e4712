//! Building record types

use crate::geometry::{BoundingBox, LatLon};
use serde::{Deserialize, Serialize};

/// Level count placeholder when no level tag is present.
pub const LEVELS_UNKNOWN: &str = "N/A";

/// Derived attributes of one building footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    /// OSM way id
    pub id: i64,
    pub address: String,
    /// Value of the `building` tag
    #[serde(rename = "type")]
    pub building_type: String,
    pub height_m: f64,
    pub area_m2: f64,
    /// Level tag text verbatim, or `"N/A"`
    pub levels: String,
    /// Closed ring of `[lat, lon]` points
    pub coords: Vec<LatLon>,
}

/// The building set for one bounding box, as cached and returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingsPayload {
    pub bbox: BoundingBox,
    pub count: usize,
    pub buildings: Vec<BuildingRecord>,
}

impl BuildingsPayload {
    pub fn new(bbox: BoundingBox, buildings: Vec<BuildingRecord>) -> Self {
        Self {
            bbox,
            count: buildings.len(),
            buildings,
        }
    }
}
