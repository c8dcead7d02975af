//! `ruta-core`: foundational types for the `ruta` fastest-route tool.
//!
//! This crate is a dependency of every other `ruta-*` crate.  It has no
//! `ruta-*` dependencies and only `thiserror` (plus optional `serde`) from
//! outside.
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `EdgeId`                                    |
//! | [`geo`]   | `GeoPoint`, haversine distance, `BoundingBox`         |
//! | [`trip`]  | `TripRequest`, `EntryOutcome`                         |
//! | [`error`] | `RutaError`, `RutaResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod trip;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RutaError, RutaResult};
pub use geo::{BoundingBox, GeoPoint};
pub use ids::{EdgeId, NodeId};
pub use trip::{EntryOutcome, TripRequest};
