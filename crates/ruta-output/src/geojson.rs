//! GeoJSON output backend.
//!
//! Writes one `FeatureCollection`:
//!
//! | `kind`        | Geometry     | Properties                                         |
//! |---------------|--------------|----------------------------------------------------|
//! | `road`        | LineString   | `speed_kmh`, `travel_time_s`, `length_m`           |
//! | `route`       | LineString\* | `title`, `distance_km`, `time_min`, `summary`      |
//! | `origin`      | Point        | `node`                                             |
//! | `destination` | Point        | `node`                                             |
//!
//! \* A `Point` when origin and destination snap to the same node.
//!
//! Road features are only written when `include_network` is set.  Infinite
//! travel times are written as `null`.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use ::geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

use ruta_core::{BoundingBox, EdgeId, GeoPoint, NodeId};
use ruta_spatial::RoadNetwork;

use crate::renderer::{RouteRenderer, RouteScene};
use crate::text::summary_text;
use crate::OutputResult;

/// Writes the scene as a GeoJSON `FeatureCollection`.
pub struct GeoJsonRenderer {
    path:            PathBuf,
    include_network: bool,
}

impl GeoJsonRenderer {
    pub fn new(path: &Path, include_network: bool) -> Self {
        Self { path: path.to_path_buf(), include_network }
    }

    /// `route.geojson` inside `dir`.
    pub fn in_dir(dir: &Path, include_network: bool) -> Self {
        Self::new(&dir.join("route.geojson"), include_network)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the collection without writing it.
    pub fn collection(&self, scene: &RouteScene<'_>) -> FeatureCollection {
        let mut features = Vec::new();
        let mut extent: Vec<GeoPoint> = Vec::new();

        if self.include_network {
            let net = scene.network;
            for i in 0..net.edge_count() {
                features.push(road_feature(net, EdgeId::from_index(i)));
            }
            extent.extend(net.node_pos.iter().copied());
        }

        let positions = scene.route_positions();
        extent.extend(positions.iter().copied());
        features.push(route_feature(scene, &positions));

        if let (Some(first), Some(last)) = (scene.route.origin(), scene.route.destination()) {
            features.push(point_feature("origin", scene.network, first));
            features.push(point_feature("destination", scene.network, last));
        }

        FeatureCollection {
            bbox: BoundingBox::enclosing(extent).map(|b| vec![b.west, b.south, b.east, b.north]),
            features,
            foreign_members: None,
        }
    }
}

impl RouteRenderer for GeoJsonRenderer {
    fn render(&mut self, scene: &RouteScene<'_>) -> OutputResult<()> {
        let collection = self.collection(scene);
        let feature_count = collection.features.len();
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer(writer, &GeoJson::FeatureCollection(collection))?;
        log::info!("wrote {feature_count} features to {}", self.path.display());
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

// ── Feature builders ──────────────────────────────────────────────────────────

fn line(points: impl IntoIterator<Item = GeoPoint>) -> Geometry {
    Geometry::new(Value::LineString(
        points.into_iter().map(|p| p.lon_lat().to_vec()).collect(),
    ))
}

fn feature(geometry: Geometry, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn finite_or_null(v: f64) -> JsonValue {
    if v.is_finite() { JsonValue::from(v) } else { JsonValue::Null }
}

fn road_feature(net: &RoadNetwork, edge: EdgeId) -> Feature {
    let w = net.weighted(edge);
    let mut props = JsonObject::new();
    props.insert("kind".into(), "road".into());
    props.insert("length_m".into(), finite_or_null(w.length_m));
    props.insert("speed_kmh".into(), finite_or_null(w.speed_kmh));
    props.insert("travel_time_s".into(), finite_or_null(w.travel_time_secs));
    let geometry = line([net.node_pos[w.key.from.index()], net.node_pos[w.key.to.index()]]);
    feature(geometry, props)
}

fn route_feature(scene: &RouteScene<'_>, positions: &[GeoPoint]) -> Feature {
    let mut props = JsonObject::new();
    props.insert("kind".into(), "route".into());
    props.insert("title".into(), scene.title.into());
    props.insert("distance_km".into(), finite_or_null(scene.summary.total_distance_km()));
    props.insert("time_min".into(), finite_or_null(scene.summary.total_time_minutes()));
    props.insert("summary".into(), summary_text(scene.summary).into());
    props.insert("nodes".into(), JsonValue::from(scene.route.nodes.len()));
    // A LineString needs two positions; a route that starts where it ends is
    // a single point.
    let geometry = match positions {
        [only] => Geometry::new(Value::Point(only.lon_lat().to_vec())),
        _ => line(positions.iter().copied()),
    };
    feature(geometry, props)
}

fn point_feature(kind: &str, net: &RoadNetwork, node: NodeId) -> Feature {
    let mut props = JsonObject::new();
    props.insert("kind".into(), kind.into());
    props.insert("node".into(), JsonValue::from(net.node_osm_id[node.index()]));
    let pos = net.node_pos[node.index()];
    feature(Geometry::new(Value::Point(pos.lon_lat().to_vec())), props)
}
