//! OSM PBF loader, enabled with the `pbf` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use ruta_spatial::osm::pbf::load_from_pbf;
//!
//! let network = load_from_pbf(Path::new("oaxaca.osm.pbf"))?.build();
//! ```
//!
//! # Memory note
//!
//! All OSM nodes are buffered in a map during the single read pass, because
//! ways reference nodes by id and may appear before or after them.  The map
//! is dropped once the builder holds the road nodes.

use std::path::Path;

use osmpbf::{Element, ElementReader};
use rustc_hash::FxHashMap;

use ruta_core::GeoPoint;

use super::{OsmWay, assemble, direction, is_drivable, speed_limit_from_tag};
use crate::network::RoadNetworkBuilder;
use crate::segment::SpeedLimit;
use crate::SpatialError;

/// Load the drivable road network from an OSM PBF file.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] if the file cannot be opened or decoded.
pub fn load_from_pbf(path: &Path) -> Result<RoadNetworkBuilder, SpatialError> {
    log::info!("loading OSM PBF from {}", path.display());
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut all_nodes: FxHashMap<i64, GeoPoint> = FxHashMap::default();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                // Collect tags eagerly so &str lifetimes don't escape the closure.
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let tag = |k: &str| tags.iter().find(|(key, _)| *key == k).map(|(_, v)| *v);
                if is_drivable(tag) {
                    road_ways.push(OsmWay {
                        refs:        w.refs().collect(),
                        direction:   direction(tag),
                        speed_limit: tag("maxspeed").map_or(SpeedLimit::Absent, speed_limit_from_tag),
                    });
                }
            }
            Element::Relation(_) => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    let builder = assemble(&all_nodes, &road_ways);
    drop(all_nodes);
    Ok(builder)
}
