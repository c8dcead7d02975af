//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `route_hops.csv`: one row per selected segment
//! - `route_summary.csv`: one row of totals per rendered route

use std::fs::File;
use std::path::Path;

use ::csv::Writer;

use crate::renderer::{RouteRenderer, RouteScene};
use crate::OutputResult;

pub const HOPS_FILE: &str = "route_hops.csv";
pub const SUMMARY_FILE: &str = "route_summary.csv";

/// Writes route hops and totals to two CSV files.
pub struct CsvRenderer {
    hops:      Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvRenderer {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut hops = Writer::from_path(dir.join(HOPS_FILE))?;
        hops.write_record([
            "hop", "from_node", "to_node", "parallel", "length_m", "speed_kmh", "travel_time_s",
        ])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summaries.write_record(["total_distance_km", "total_time_min", "hops"])?;

        Ok(Self { hops, summaries, finished: false })
    }
}

impl RouteRenderer for CsvRenderer {
    fn render(&mut self, scene: &RouteScene<'_>) -> OutputResult<()> {
        let osm_id = |n: ruta_core::NodeId| scene.network.node_osm_id[n.index()];
        for (i, hop) in scene.summary.hops.iter().enumerate() {
            self.hops.write_record(&[
                i.to_string(),
                osm_id(hop.key.from).to_string(),
                osm_id(hop.key.to).to_string(),
                hop.key.parallel.to_string(),
                format!("{:.3}", hop.length_m),
                format!("{:.3}", hop.speed_kmh),
                format!("{:.3}", hop.travel_time_secs),
            ])?;
        }
        self.summaries.write_record(&[
            format!("{:.3}", scene.summary.total_distance_km()),
            format!("{:.3}", scene.summary.total_time_minutes()),
            scene.summary.hops.len().to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.hops.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
