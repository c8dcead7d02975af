//! Run configuration, loaded from `.toml` or `.json`.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! default_speed_kmh = 30.0
//! output_dir = "out"
//!
//! [area]
//! south = 16.98
//! west = -96.78
//! north = 17.09
//! east = -96.68
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ruta_core::{BoundingBox, RutaError};
use ruta_spatial::osm::fetch::{DEFAULT_ENDPOINT, OverpassQuery};

/// A labelled coordinate shown next to the entry form for copy and paste.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub label: String,
    pub lat:   f64,
    pub lon:   f64,
}

impl PointOfInterest {
    pub fn new(label: &str, lat: f64, lon: f64) -> Self {
        Self { label: label.to_owned(), lat, lon }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Place names whose administrative areas make up the network.
    pub places: Vec<String>,
    /// Download by bounding box instead of by place name.
    pub area: Option<BoundingBox>,
    /// Speed assumed for segments without a usable `maxspeed` tag.
    pub default_speed_kmh: f64,
    pub overpass_url: String,
    pub timeout_secs: u64,
    pub output_dir: PathBuf,
    /// Write every road segment to the GeoJSON output, not just the route.
    pub include_network: bool,
    pub title: String,
    pub points_of_interest: Vec<PointOfInterest>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            places: vec![
                "Oaxaca de Juárez, Oaxaca, Mexico".to_owned(),
                "Santa Cruz Xoxocotlán, Oaxaca, Mexico".to_owned(),
                "San Raymundo Jalpan, Oaxaca, Mexico".to_owned(),
            ],
            area: None,
            default_speed_kmh: 20.0,
            overpass_url: DEFAULT_ENDPOINT.to_owned(),
            timeout_secs: 180,
            output_dir: PathBuf::from("output"),
            include_network: true,
            title: "Fastest route (travel time)".to_owned(),
            points_of_interest: vec![
                PointOfInterest::new("Santo Domingo", 17.0654, -96.7219),
                PointOfInterest::new("Aeropuerto XOX", 16.9993, -96.7266),
                PointOfInterest::new("Anáhuac Oaxaca", 16.9971, -96.7561),
            ],
        }
    }
}

impl AppConfig {
    /// The Overpass request for the configured area; a bounding box wins
    /// over place names.
    pub fn overpass_query(&self) -> OverpassQuery {
        match self.area {
            Some(b) => OverpassQuery::Area(b),
            None => OverpassQuery::Places(self.places.clone()),
        }
    }
}

impl TryFrom<&Path> for AppConfig {
    type Error = RutaError;

    fn try_from(f: &Path) -> Result<Self, Self::Error> {
        let read = || {
            std::fs::read_to_string(f).map_err(|e| {
                RutaError::Config(format!("failure reading {}: {e}", f.display()))
            })
        };
        let decode_err =
            |e: &dyn std::fmt::Display| RutaError::Config(format!("failure decoding {}: {e}", f.display()));

        match f.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&read()?).map_err(|e| decode_err(&e)),
            Some("json") => serde_json::from_str(&read()?).map_err(|e| decode_err(&e)),
            _ => Err(RutaError::Config(format!("unsupported file type: {}", f.display()))),
        }
    }
}
