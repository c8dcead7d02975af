//! Distance and time totals for a routed node sequence.
//!
//! The search yields nodes, not edges.  Where a hop has parallel edges, the
//! one with the smallest travel time is the one the search must have used,
//! so [`summarize`] re-selects it per hop (first encountered wins ties).

use thiserror::Error;

use ruta_core::NodeId;

use crate::segment::WeightedSegment;

/// A consecutive route pair had no connecting segment.  Only possible when
/// the route did not come from a search over the same network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no segment connects {from} to {to}")]
pub struct MissingEdgeError {
    pub from: NodeId,
    pub to:   NodeId,
}

/// Totals over the segment selected at each hop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteSummary {
    pub total_distance_m: f64,
    pub total_time_secs:  f64,
    /// The selected segment of each consecutive pair, in route order.
    pub hops: Vec<WeightedSegment>,
}

impl RouteSummary {
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_m / 1_000.0
    }

    pub fn total_time_minutes(&self) -> f64 {
        self.total_time_secs / 60.0
    }
}

/// Aggregate `route` using `edge_lookup(u, v)`, which yields every parallel
/// segment from `u` to `v`.
///
/// A route of N nodes issues exactly N−1 lookups.
///
/// # Errors
///
/// [`MissingEdgeError`] for the first pair whose lookup is empty.
pub fn summarize<F, I>(route: &[NodeId], mut edge_lookup: F) -> Result<RouteSummary, MissingEdgeError>
where
    F: FnMut(NodeId, NodeId) -> I,
    I: IntoIterator<Item = WeightedSegment>,
{
    let mut summary = RouteSummary {
        hops: Vec::with_capacity(route.len().saturating_sub(1)),
        ..RouteSummary::default()
    };

    for pair in route.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let chosen = edge_lookup(from, to)
            .into_iter()
            .min_by(|a, b| a.travel_time_secs.total_cmp(&b.travel_time_secs))
            .ok_or(MissingEdgeError { from, to })?;

        summary.total_distance_m += chosen.length_m;
        summary.total_time_secs += chosen.travel_time_secs;
        summary.hops.push(chosen);
    }

    Ok(summary)
}
