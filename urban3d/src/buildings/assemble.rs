//! Turns raw Overpass ways and nodes into building records.

use super::record::{BuildingRecord, LEVELS_UNKNOWN};
use crate::geometry::{estimate_height, polygon_area, round_to, BoundingBox, LatLon, Tags};
use crate::provider::{Element, OverpassResponse};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Minimum node references for a way to describe a closed polygon
/// (three corners plus the closing repeat).
pub const MIN_WAY_NODES: usize = 4;

/// Builds records for every usable building way in the response.
///
/// Ways with fewer than four node references are dropped, open rings are
/// closed by repeating the first node, and ways that reference a node the
/// response does not contain are skipped without failing the batch.
/// Output follows the order of ways in the response.
pub fn assemble_buildings(bbox: &BoundingBox, response: &OverpassResponse) -> Vec<BuildingRecord> {
    let nodes: HashMap<i64, LatLon> = response
        .elements
        .iter()
        .filter_map(|el| match el {
            Element::Node { id, lat, lon } => Some((*id, LatLon::new(*lat, *lon))),
            _ => None,
        })
        .collect();

    let (lat0, lon0) = bbox.center();
    let mut buildings = Vec::new();
    let mut skipped = 0usize;

    for element in &response.elements {
        let Element::Way { id, nodes: refs, tags } = element else {
            continue;
        };

        if refs.len() < MIN_WAY_NODES {
            trace!(way = id, nodes = refs.len(), "Way too short for a footprint");
            skipped += 1;
            continue;
        }

        let Some(ring) = resolve_ring(refs, &nodes) else {
            trace!(way = id, "Way references a missing node");
            skipped += 1;
            continue;
        };

        buildings.push(BuildingRecord {
            id: *id,
            address: address_from_tags(tags),
            building_type: non_empty(tags, "building").unwrap_or("building").to_string(),
            height_m: estimate_height(tags),
            area_m2: round_to(polygon_area(&ring, lat0, lon0), 2),
            levels: levels_from_tags(tags),
            coords: ring,
        });
    }

    debug!(
        buildings = buildings.len(),
        skipped = skipped,
        "Assembled buildings"
    );
    buildings
}

/// Resolves node references into a closed ring, or `None` if any node is missing.
fn resolve_ring(refs: &[i64], nodes: &HashMap<i64, LatLon>) -> Option<Vec<LatLon>> {
    let mut ids = refs.to_vec();
    if ids.first() != ids.last() {
        ids.push(ids[0]);
    }
    ids.iter().map(|id| nodes.get(id).copied()).collect()
}

fn non_empty<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// House number and street joined by a space, else `name`, else "Unknown".
pub fn address_from_tags(tags: &Tags) -> String {
    let street_address = [
        non_empty(tags, "addr:housenumber"),
        non_empty(tags, "addr:street"),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ");

    if !street_address.is_empty() {
        return street_address;
    }
    non_empty(tags, "name").unwrap_or("Unknown").to_string()
}

/// `building:levels`, then `levels`, verbatim; "N/A" when neither is set.
pub fn levels_from_tags(tags: &Tags) -> String {
    non_empty(tags, "building:levels")
        .or_else(|| non_empty(tags, "levels"))
        .unwrap_or(LEVELS_UNKNOWN)
        .to_string()
}
