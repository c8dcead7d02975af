//! One analysis run: load the network, snap the request, route, summarize,
//! render.

use std::path::PathBuf;
use std::time::Duration;

use ruta_core::{GeoPoint, NodeId, TripRequest};
use ruta_output::csv::{HOPS_FILE, SUMMARY_FILE};
use ruta_output::{CsvRenderer, GeoJsonRenderer, RouteRenderer, RouteScene};
use ruta_spatial::osm::fetch::{OverpassClient, OverpassQuery};
use ruta_spatial::osm::{overpass, pbf};
use ruta_spatial::{
    DijkstraRouter, EdgeWeightCalculator, RoadNetwork, Route, RouteSummary, Router, SpatialError,
};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Where the road network comes from.
#[derive(Clone, Debug)]
pub enum NetworkSource {
    /// A saved Overpass API JSON response.
    OverpassFile(PathBuf),
    Pbf(PathBuf),
    /// Live download.
    Overpass(OverpassQuery),
}

/// Result of a completed run.
#[derive(Debug)]
pub enum Outcome {
    Routed {
        route:     Route,
        summary:   RouteSummary,
        artifacts: Vec<PathBuf>,
    },
    /// The snapped nodes are not connected in the drivable network.
    NoRoute { from: NodeId, to: NodeId },
}

/// Load and weight the network described by `source`.
pub fn load_network(config: &AppConfig, source: &NetworkSource) -> AppResult<RoadNetwork> {
    let builder = match source {
        NetworkSource::OverpassFile(path) => overpass::load_from_file(path)?,
        NetworkSource::Pbf(path) => pbf::load_from_pbf(path)?,
        NetworkSource::Overpass(query) => {
            let client = OverpassClient::new(
                config.overpass_url.as_str(),
                Duration::from_secs(config.timeout_secs),
            )?;
            client.load(query)?
        }
    };
    let calculator = EdgeWeightCalculator::new(config.default_speed_kmh);
    Ok(builder.build_weighted(&calculator))
}

/// Route `trip` over `network` and write the configured artifacts.
pub fn analyse(config: &AppConfig, network: &RoadNetwork, trip: &TripRequest) -> AppResult<Outcome> {
    let from = snap(network, trip.origin(), "origin")?;
    let to = snap(network, trip.destination(), "destination")?;

    let route = match DijkstraRouter.route(network, from, to) {
        Ok(route) => route,
        Err(SpatialError::NoRoute { from, to }) => {
            log::warn!("no drivable route from {from} to {to}");
            return Ok(Outcome::NoRoute { from, to });
        }
        Err(e) => return Err(e.into()),
    };
    let summary = network.summarize(&route).map_err(SpatialError::from)?;
    log::info!(
        "route of {} nodes, {:.2} km, {:.2} min",
        route.nodes.len(),
        summary.total_distance_km(),
        summary.total_time_minutes(),
    );

    let artifacts = render(config, network, &route, &summary)?;
    Ok(Outcome::Routed { route, summary, artifacts })
}

fn snap(network: &RoadNetwork, pos: GeoPoint, which: &str) -> AppResult<NodeId> {
    let node = network.snap_to_node(pos).ok_or(SpatialError::EmptyNetwork)?;
    if network.bounds().is_some_and(|b| !b.contains(pos)) {
        log::warn!("{which} {pos} lies outside the loaded network; snapping to the nearest node");
    }
    log::debug!("{which} {pos} snapped to {node}");
    Ok(node)
}

fn render(
    config: &AppConfig,
    network: &RoadNetwork,
    route: &Route,
    summary: &RouteSummary,
) -> AppResult<Vec<PathBuf>> {
    let dir = &config.output_dir;
    std::fs::create_dir_all(dir)?;

    let scene = RouteScene { network, route, summary, title: &config.title };
    let geojson = GeoJsonRenderer::in_dir(dir, config.include_network);
    let artifacts = vec![geojson.path().to_path_buf(), dir.join(HOPS_FILE), dir.join(SUMMARY_FILE)];

    let mut renderers: Vec<Box<dyn RouteRenderer>> =
        vec![Box::new(geojson), Box::new(CsvRenderer::new(dir)?)];
    for r in &mut renderers {
        r.render(&scene)?;
        r.finish()?;
    }
    Ok(artifacts)
}
