//! Overpass API download, enabled with the `fetch` Cargo feature.
//!
//! Requests are blocking and all-or-nothing: a transport error, a non-2xx
//! status, or an unparseable body fails the whole load.  Nothing is retried
//! and nothing is cached.

use std::time::Duration;

use ruta_core::BoundingBox;

use super::DRIVE_FILTER;
use super::overpass;
use crate::network::RoadNetworkBuilder;
use crate::SpatialResult;

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Which part of the map to download.
#[derive(Clone, Debug, PartialEq)]
pub enum OverpassQuery {
    /// Administrative areas by name, e.g. `"Oaxaca de Juárez, Oaxaca, Mexico"`.
    /// Only the first comma-separated component is matched against the
    /// area's `name` tag.
    Places(Vec<String>),
    Area(BoundingBox),
}

impl OverpassQuery {
    /// Render as Overpass QL returning drivable ways and their nodes.
    pub fn to_overpass_ql(&self, timeout_secs: u64) -> String {
        let mut ql = format!("[out:json][timeout:{timeout_secs}];\n");
        match self {
            OverpassQuery::Places(places) => {
                for (i, place) in places.iter().enumerate() {
                    ql.push_str(&format!(
                        "area[\"name\"=\"{}\"][\"boundary\"=\"administrative\"]->.a{i};\n",
                        escape(area_name(place)),
                    ));
                }
                ql.push_str("(\n");
                for i in 0..places.len() {
                    ql.push_str(&format!("  way{DRIVE_FILTER}(area.a{i});\n"));
                }
                ql.push_str(");\n");
            }
            OverpassQuery::Area(b) => {
                ql.push_str(&format!(
                    "(\n  way{DRIVE_FILTER}({},{},{},{});\n);\n",
                    b.south, b.west, b.north, b.east,
                ));
            }
        }
        ql.push_str("(._;>;);\nout body;\n");
        ql
    }
}

fn area_name(place: &str) -> &str {
    place.split(',').next().unwrap_or(place).trim()
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Blocking Overpass API client.
pub struct OverpassClient {
    endpoint: String,
    timeout:  Duration,
    client:   reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> SpatialResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ruta/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { endpoint: endpoint.into(), timeout, client })
    }

    /// Download the raw Overpass JSON for `query`.
    pub fn fetch_json(&self, query: &OverpassQuery) -> SpatialResult<String> {
        let ql = query.to_overpass_ql(self.timeout.as_secs());
        log::info!("requesting road network from {}", self.endpoint);
        log::debug!("overpass query:\n{ql}");
        let body = self
            .client
            .post(&self.endpoint)
            .form(&[("data", ql.as_str())])
            .send()?
            .error_for_status()?
            .text()?;
        log::info!("received {} bytes", body.len());
        Ok(body)
    }

    /// Download and parse `query` into an unweighted builder.
    pub fn load(&self, query: &OverpassQuery) -> SpatialResult<RoadNetworkBuilder> {
        overpass::load_from_str(&self.fetch_json(query)?)
    }
}
