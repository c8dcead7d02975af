//! `ruta-spatial`: travel-time weighted road network, spatial indexing,
//! routing, and route summaries.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`segment`] | `SpeedLimit`, `SegmentKey`, `Segment`, `WeightedSegment`        |
//! | [`weight`]  | `EdgeWeightCalculator`, `parse_speed_kmh`, `WeightingStats`     |
//! | [`network`] | `RoadNetwork` (weighted CSR + R-tree), `RoadNetworkBuilder`     |
//! | [`router`]  | `Router` trait, `Route`, `DijkstraRouter`                       |
//! | [`summary`] | `summarize`, `RouteSummary`, `MissingEdgeError`                 |
//! | [`osm`]     | drivable-way filter, Overpass JSON / PBF loaders, fetcher       |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `pbf`   | Enables OSM PBF loading via the `osmpbf` crate.             |
//! | `fetch` | Enables Overpass API downloads via blocking `reqwest`.      |

pub mod error;
pub mod network;
pub mod osm;
pub mod router;
pub mod segment;
pub mod summary;
pub mod weight;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use router::{DijkstraRouter, Route, Router};
pub use segment::{Segment, SegmentKey, SpeedLimit, SpeedSource, WeightedSegment};
pub use summary::{MissingEdgeError, RouteSummary, summarize};
pub use weight::{EdgeWeightCalculator, WeightingStats, parse_speed_kmh};
