//! The `RouteRenderer` trait implemented by all renderers.

use ruta_core::GeoPoint;
use ruta_spatial::{RoadNetwork, Route, RouteSummary};

use crate::OutputResult;

/// Everything a renderer needs to draw one result.
#[derive(Clone, Copy)]
pub struct RouteScene<'a> {
    pub network: &'a RoadNetwork,
    pub route:   &'a Route,
    pub summary: &'a RouteSummary,
    pub title:   &'a str,
}

impl RouteScene<'_> {
    /// Positions of the route nodes, in order.
    pub fn route_positions(&self) -> Vec<GeoPoint> {
        self.route
            .nodes
            .iter()
            .map(|n| self.network.node_pos[n.index()])
            .collect()
    }
}

/// Trait implemented by the GeoJSON and CSV renderers.
pub trait RouteRenderer {
    fn render(&mut self, scene: &RouteScene<'_>) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
