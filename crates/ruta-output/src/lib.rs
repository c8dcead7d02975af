//! `ruta-output`: renderers for a routed trip.
//!
//! | Renderer            | Files created                                 |
//! |---------------------|-----------------------------------------------|
//! | [`GeoJsonRenderer`] | `route.geojson` (or a chosen path)            |
//! | [`CsvRenderer`]     | `route_hops.csv`, `route_summary.csv`         |
//!
//! Both implement [`RouteRenderer`] and consume a [`RouteScene`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use ruta_output::{CsvRenderer, RouteRenderer, RouteScene};
//!
//! let scene = RouteScene { network: &net, route: &route, summary: &summary, title: "Fastest route" };
//! let mut csv = CsvRenderer::new(Path::new("./output"))?;
//! csv.render(&scene)?;
//! csv.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod geojson;
pub mod renderer;
pub mod text;


pub use crate::csv::CsvRenderer;
pub use crate::geojson::GeoJsonRenderer;
pub use error::{OutputError, OutputResult};
pub use renderer::{RouteRenderer, RouteScene};
pub use text::summary_text;
