//! Spatial-subsystem error type.

use thiserror::Error;

use ruta_core::NodeId;

use crate::summary::MissingEdgeError;

/// Errors produced by `ruta-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The search finished without reaching the target.  This is an expected
    /// outcome for disconnected networks, not a fault.
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("{0} not found in network")]
    NodeNotFound(NodeId),

    #[error(transparent)]
    MissingEdge(#[from] MissingEdgeError),

    #[error("road network has no nodes")]
    EmptyNetwork,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Overpass JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "pbf")]
    #[error("OSM parse error: {0}")]
    Osm(String),

    #[cfg(feature = "fetch")]
    #[error("Overpass request failed: {0}")]
    Fetch(#[from] reqwest::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
