//! Overpass API JSON loader.
//!
//! Accepts the `[out:json]` response shape:
//!
//! ```text
//! { "elements": [ {"type": "node", "id": 1, "lat": .., "lon": ..},
//!                 {"type": "way",  "id": 9, "nodes": [1, 2], "tags": {..}} ] }
//! ```
//!
//! Other element types are ignored.  `maxspeed` may be a string, a number,
//! or an array of either (as produced by tools that merge ways).

use std::collections::HashMap;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

use ruta_core::GeoPoint;

use super::{OsmWay, assemble, direction, is_drivable, speed_limit_from_tag};
use crate::network::RoadNetworkBuilder;
use crate::segment::SpeedLimit;
use crate::SpatialResult;

#[derive(Deserialize)]
struct OverpassResponse {
    elements: Vec<Element>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Element {
    Node {
        id:  i64,
        lat: f64,
        lon: f64,
    },
    Way {
        nodes: Vec<i64>,
        #[serde(default)]
        tags:  HashMap<String, Value>,
    },
    #[serde(other)]
    Other,
}

/// Parse an Overpass JSON document into an unweighted builder.
///
/// # Errors
///
/// [`SpatialError::Json`](crate::SpatialError::Json) if the document is not
/// valid Overpass JSON.
pub fn load_from_str(json: &str) -> SpatialResult<RoadNetworkBuilder> {
    let response: OverpassResponse = serde_json::from_str(json)?;

    let mut nodes: FxHashMap<i64, GeoPoint> = FxHashMap::default();
    let mut ways: Vec<OsmWay> = Vec::new();
    let mut rejected = 0usize;

    for element in response.elements {
        match element {
            Element::Node { id, lat, lon } => {
                nodes.insert(id, GeoPoint::new(lat, lon));
            }
            Element::Way { nodes: refs, tags } => {
                let tag = |k: &str| tags.get(k).and_then(Value::as_str);
                if !is_drivable(tag) {
                    rejected += 1;
                    continue;
                }
                ways.push(OsmWay {
                    direction: direction(tag),
                    speed_limit: speed_limit_from_json(tags.get("maxspeed")),
                    refs,
                });
            }
            Element::Other => {}
        }
    }

    log::debug!("overpass: {} nodes, {} drivable ways, {rejected} rejected", nodes.len(), ways.len());
    Ok(assemble(&nodes, &ways))
}

/// Read and parse an Overpass JSON file.
pub fn load_from_file(path: &Path) -> SpatialResult<RoadNetworkBuilder> {
    log::info!("loading Overpass JSON from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    load_from_str(&json)
}

fn speed_limit_from_json(value: Option<&Value>) -> SpeedLimit {
    match value {
        None | Some(Value::Null) => SpeedLimit::Absent,
        Some(Value::String(s)) => speed_limit_from_tag(s),
        Some(Value::Array(items)) => SpeedLimit::Multiple(items.iter().map(json_token).collect()),
        Some(other) => SpeedLimit::Single(json_token(other)),
    }
}

fn json_token(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
