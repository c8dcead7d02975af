//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers go through the [`Router`] trait, so a different search (A*,
//! contraction hierarchies) can replace [`DijkstraRouter`] without touching
//! the weighting or summary code.
//!
//! # Cost units
//!
//! The cost minimized is `edge_travel_secs` (seconds, `f64`).  An infinite
//! travel time (zero-speed segment) is a cost, not a missing edge: it is only
//! taken when nothing finite reaches the node, and a target reached that way
//! comes back as a route with an infinite total.  [`SpatialError::NoRoute`]
//! means there is no chain of segments at all.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use ruta_core::{EdgeId, NodeId};

use crate::network::RoadNetwork;
use crate::SpatialError;

// ── Route ─────────────────────────────────────────────────────────────────────

/// The result of a routing query: the ordered node sequence and the total
/// cost the search minimized.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Nodes from source to destination inclusive.
    pub nodes: Vec<NodeId>,
    /// Sum of `edge_travel_secs` along the path the search relaxed.
    pub total_travel_secs: f64,
}

impl Route {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn origin(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Shortest-path search over a weighted [`RoadNetwork`].
pub trait Router {
    /// Compute the minimum-time route from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NoRoute`] if `to` is unreachable.
    /// - [`SpatialError::NodeNotFound`] if either id is outside the network.
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError>;
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the CSR road graph, minimizing travel
/// time in seconds.
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn route(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
        for node in [from, to] {
            if !network.contains_node(node) {
                return Err(SpatialError::NodeNotFound(node));
            }
        }
        dijkstra(network, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(network: &RoadNetwork, from: NodeId, to: NodeId) -> Result<Route, SpatialError> {
    if from == to {
        return Ok(Route { nodes: vec![from], total_travel_secs: 0.0 });
    }

    let n = network.node_count();
    // dist[v] = best known cost (s) to reach v.
    let mut dist      = vec![f64::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];
    // reached[v] = some path to v was found, possibly at infinite cost.
    let mut reached   = vec![false; n];

    dist[from.index()] = 0.0;
    reached[from.index()] = true;

    // Min-heap: (cost, node).  Secondary key NodeId ensures deterministic
    // tie-breaking.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), from)));

    let mut settled = 0usize;

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if node == to {
            log::debug!("dijkstra settled {settled} nodes, cost {cost:.1} s");
            return Ok(reconstruct(network, &prev_edge, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        settled += 1;

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + network.edge_travel_secs[edge.index()];

            let v = neighbor.index();
            if new_cost < dist[v] || !reached[v] {
                reached[v] = true;
                dist[v] = new_cost;
                prev_edge[v] = edge;
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }

    log::debug!("dijkstra exhausted {settled} nodes without reaching {to}");
    Err(SpatialError::NoRoute { from, to })
}

fn reconstruct(network: &RoadNetwork, prev_edge: &[EdgeId], to: NodeId, total_secs: f64) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    Route { nodes, total_travel_secs: total_secs }
}
