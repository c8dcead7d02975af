//! OpenStreetMap loaders.
//!
//! # Sources
//!
//! | Module                | Input                                   | Feature |
//! |-----------------------|-----------------------------------------|---------|
//! | [`overpass`]          | Overpass API JSON (string or file)      | none    |
//! | [`pbf`]               | `.osm.pbf` extract                      | `pbf`   |
//! | [`fetch`]             | live Overpass API download              | `fetch` |
//!
//! Every loader returns an unweighted [`RoadNetworkBuilder`]; the caller
//! chooses the [`EdgeWeightCalculator`](crate::EdgeWeightCalculator) at
//! build time.
//!
//! # What is loaded
//!
//! Only ways passing [`is_drivable`] are kept.  Each pair of consecutive way
//! nodes becomes one directed segment (two for two-way roads) whose length
//! is the haversine distance between the nodes and whose speed limit is the
//! way's raw `maxspeed` tag.  Two ways sharing a node pair produce parallel
//! segments.

pub mod overpass;

#[cfg(feature = "pbf")]
pub mod pbf;

#[cfg(feature = "fetch")]
pub mod fetch;

use rustc_hash::FxHashMap;

use ruta_core::{GeoPoint, NodeId};

use crate::network::RoadNetworkBuilder;
use crate::segment::SpeedLimit;

/// Overpass QL filter selecting the ways [`is_drivable`] accepts.
pub const DRIVE_FILTER: &str = concat!(
    r#"["highway"]["area"!~"yes"]"#,
    r#"["highway"!~"abandoned|bridleway|bus_guideway|construction|corridor|cycleway|elevator|escalator|footway|no|path|pedestrian|planned|platform|proposed|raceway|razed|service|steps|track"]"#,
    r#"["motor_vehicle"!~"no"]["motorcar"!~"no"]"#,
    r#"["access"!~"private"]"#,
    r#"["service"!~"alley|driveway|emergency_access|parking|parking_aisle|private"]"#,
);

const EXCLUDED_HIGHWAYS: &[&str] = &[
    "abandoned", "bridleway", "bus_guideway", "construction", "corridor", "cycleway",
    "elevator", "escalator", "footway", "no", "path", "pedestrian", "planned", "platform",
    "proposed", "raceway", "razed", "service", "steps", "track",
];

const EXCLUDED_SERVICES: &[&str] =
    &["alley", "driveway", "emergency_access", "parking", "parking_aisle", "private"];

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// Whether a way belongs to the drivable network.  `tag` looks up a tag value
/// by key.
pub fn is_drivable<'t, F>(tag: F) -> bool
where
    F: Fn(&str) -> Option<&'t str>,
{
    let Some(highway) = tag("highway") else {
        return false;
    };
    if tag("area") == Some("yes") || EXCLUDED_HIGHWAYS.contains(&highway) {
        return false;
    }
    if tag("motor_vehicle") == Some("no") || tag("motorcar") == Some("no") {
        return false;
    }
    if tag("access").is_some_and(|a| a.contains("private")) {
        return false;
    }
    !tag("service").is_some_and(|s| EXCLUDED_SERVICES.contains(&s))
}

/// Travel directions permitted on a way, relative to its node order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Both,
}

/// Determine the permitted directions of a way.
///
/// Roundabouts, motorways, and motorway links are implicitly one-way.
pub fn direction<'t, F>(tag: F) -> Direction
where
    F: Fn(&str) -> Option<&'t str>,
{
    match tag("oneway") {
        Some("yes" | "true" | "1") => return Direction::Forward,
        Some("-1" | "reverse") => return Direction::Backward,
        Some("no" | "false" | "0") => return Direction::Both,
        _ => {}
    }
    let implicit = tag("junction") == Some("roundabout")
        || matches!(tag("highway"), Some("motorway" | "motorway_link"));
    if implicit { Direction::Forward } else { Direction::Both }
}

/// Convert a raw `maxspeed` tag value.  The string is kept verbatim, so a
/// `;`-joined value such as `"40;60"` is one token and does not parse as a
/// speed.  Lists only come from JSON arrays.
pub fn speed_limit_from_tag(value: &str) -> SpeedLimit {
    SpeedLimit::Single(value.to_owned())
}

// ── Network assembly ──────────────────────────────────────────────────────────

/// A drivable way, reduced to what the network needs.
pub(crate) struct OsmWay {
    pub refs:        Vec<i64>,
    pub direction:   Direction,
    pub speed_limit: SpeedLimit,
}

/// Turn parsed OSM nodes and drivable ways into a builder.
///
/// Nodes are added in first-reference order, so loading the same input twice
/// yields identical `NodeId`s.  Way node pairs with an unknown endpoint or
/// repeated node are skipped.
pub(crate) fn assemble(nodes: &FxHashMap<i64, GeoPoint>, ways: &[OsmWay]) -> RoadNetworkBuilder {
    let ref_count: usize = ways.iter().map(|w| w.refs.len()).sum();
    let mut builder = RoadNetworkBuilder::with_capacity(ref_count, ref_count * 2);
    let mut osm_to_ruta: FxHashMap<i64, NodeId> = FxHashMap::default();
    let mut skipped = 0usize;

    for way in ways {
        for &osm_id in &way.refs {
            if osm_to_ruta.contains_key(&osm_id) {
                continue;
            }
            if let Some(&pos) = nodes.get(&osm_id) {
                osm_to_ruta.insert(osm_id, builder.add_osm_node(osm_id, pos));
            }
        }
    }

    for way in ways {
        for window in way.refs.windows(2) {
            let (Some(&a), Some(&b)) = (osm_to_ruta.get(&window[0]), osm_to_ruta.get(&window[1])) else {
                skipped += 1;
                continue;
            };
            if a == b {
                skipped += 1;
                continue;
            }
            let len_m = builder.node_pos(a).distance_m(builder.node_pos(b));
            if way.direction != Direction::Backward {
                builder.add_directed_edge(a, b, len_m, way.speed_limit.clone());
            }
            if way.direction != Direction::Forward {
                builder.add_directed_edge(b, a, len_m, way.speed_limit.clone());
            }
        }
    }

    if skipped > 0 {
        log::debug!("skipped {skipped} way node pairs with missing or repeated nodes");
    }
    log::info!(
        "assembled {} nodes and {} segments from {} drivable ways",
        builder.node_count(),
        builder.edge_count(),
        ways.len(),
    );
    builder
}
