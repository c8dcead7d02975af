//! `ruta-cli`: the `fastest-route` binary and the pieces it is built from.
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`config`] | `AppConfig`, `PointOfInterest`, `.toml` / `.json` loading   |
//! | [`prompt`] | `prompt_trip`, the interactive coordinate form             |
//! | [`app`]    | `load_network`, `analyse`, `NetworkSource`, `Outcome`      |
//! | [`error`]  | `AppError`, `AppResult<T>`                                 |
//!
//! The order of a run is fixed: coordinates are collected first, then the
//! network is loaded and weighted, then the trip is routed and rendered.  A
//! cancelled form stops the run before any download.

pub mod app;
pub mod config;
pub mod error;
pub mod prompt;


pub use app::{NetworkSource, Outcome, analyse, load_network};
pub use config::{AppConfig, PointOfInterest};
pub use error::{AppError, AppResult};
pub use prompt::prompt_trip;
