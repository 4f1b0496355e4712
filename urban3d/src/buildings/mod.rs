//! Building records derived from OSM footprints.

mod assemble;
mod record;

pub use assemble::{address_from_tags, assemble_buildings, levels_from_tags, MIN_WAY_NODES};
pub use record::{BuildingRecord, BuildingsPayload, LEVELS_UNKNOWN};
