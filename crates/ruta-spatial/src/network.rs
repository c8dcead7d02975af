//! Weighted road network and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edges are sorted by `(from, to)` with a stable sort, so parallel segments
//! between one ordered node pair are contiguous and keep their insertion
//! order.  That order defines `SegmentKey::parallel`.
//!
//! # Weights
//!
//! A `RoadNetwork` only comes out of [`RoadNetworkBuilder::build_weighted`],
//! which runs the [`EdgeWeightCalculator`] over every edge in one pass.  There
//! is no unweighted network and no way to change a weight afterwards.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use ruta_core::{BoundingBox, EdgeId, GeoPoint, NodeId};

use crate::router::Route;
use crate::segment::{Segment, SegmentKey, SpeedLimit, SpeedSource, WeightedSegment};
use crate::summary::{self, MissingEdgeError, RouteSummary};
use crate::weight::{EdgeWeightCalculator, WeightingStats};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a `[lat, lon]` point with the
/// associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in degrees, not haversine.  A degree of
    /// longitude is shorter than a degree of latitude by `cos(lat)` (about 4%
    /// at 17° N), so near-ties across the two axes can pick a different node
    /// than a great-circle search would.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road multigraph in CSR format, every edge weighted by travel time.
///
/// Fields are `pub` for direct indexed access; construct with
/// [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Source identifier of each node (OSM node id for loaded networks,
    /// the node index for hand-built ones).
    pub node_osm_id: Vec<i64>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_from: Vec<NodeId>,
    pub edge_to: Vec<NodeId>,
    /// Index among parallel edges of the same `(from, to)` pair.
    pub edge_parallel: Vec<u32>,
    /// Metres.
    pub edge_length_m: Vec<f64>,
    pub edge_speed_limit: Vec<SpeedLimit>,

    // ── Derived weights ───────────────────────────────────────────────────
    pub edge_speed_kmh: Vec<f64>,
    /// Dijkstra edge cost, seconds.  `f64::INFINITY` for zero-speed edges.
    pub edge_travel_secs: Vec<f64>,
    pub edge_speed_source: Vec<SpeedSource>,

    stats: WeightingStats,
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(EdgeId::from_index)
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// All parallel edges from `from` to `to`, in `parallel` order.
    /// Empty if either node is unknown or the pair is not adjacent.
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let range = if self.contains_node(from) {
            let start = self.node_out_start[from.index()] as usize;
            let end   = self.node_out_start[from.index() + 1] as usize;
            // Out-edges are sorted by destination.
            let slice = &self.edge_to[start..end];
            let lo = slice.partition_point(|&t| t < to);
            let hi = slice.partition_point(|&t| t <= to);
            (start + lo)..(start + hi)
        } else {
            0..0
        };
        range.map(EdgeId::from_index)
    }

    // ── Edge views ────────────────────────────────────────────────────────

    pub fn segment_key(&self, edge: EdgeId) -> SegmentKey {
        SegmentKey {
            from:     self.edge_from[edge.index()],
            to:       self.edge_to[edge.index()],
            parallel: self.edge_parallel[edge.index()],
        }
    }

    /// The raw segment as loaded.
    pub fn segment(&self, edge: EdgeId) -> Segment<'_> {
        Segment {
            key:         self.segment_key(edge),
            length_m:    self.edge_length_m[edge.index()],
            speed_limit: &self.edge_speed_limit[edge.index()],
        }
    }

    /// The segment with the weights computed at build time.
    pub fn weighted(&self, edge: EdgeId) -> WeightedSegment {
        let i = edge.index();
        WeightedSegment {
            key:              self.segment_key(edge),
            length_m:         self.edge_length_m[i],
            speed_kmh:        self.edge_speed_kmh[i],
            travel_time_secs: self.edge_travel_secs[i],
            speed_source:     self.edge_speed_source[i],
        }
    }

    pub fn weighting_stats(&self) -> WeightingStats {
        self.stats
    }

    // ── Route aggregation ─────────────────────────────────────────────────

    /// Re-derive the fastest parallel edge for every hop of `route` and total
    /// its distance and time.
    pub fn summarize(&self, route: &Route) -> Result<RouteSummary, MissingEdgeError> {
        summary::summarize(&route.nodes, |u, v| {
            self.edges_between(u, v).map(|e| self.weighted(e))
        })
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest road node to `pos`, measured in
    /// plain lat/lon degrees rather than metres.
    ///
    /// Returns `None` only if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
    }

    /// Extent of all node positions, `None` for an empty network.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.node_pos.iter().copied())
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call
/// [`build_weighted`](Self::build_weighted).
///
/// # Example
///
/// ```
/// use ruta_core::GeoPoint;
/// use ruta_spatial::{EdgeWeightCalculator, RoadNetworkBuilder, SpeedLimit};
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(17.0654, -96.7219));
/// let c = b.add_node(GeoPoint::new(17.0600, -96.7250));
/// b.add_road(a, c, 1_000.0, SpeedLimit::Absent);
/// let net = b.build_weighted(&EdgeWeightCalculator::new(20.0));
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// assert!((net.edge_travel_secs[0] - 180.0).abs() < 1e-9);
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    osm_ids:   Vec<i64>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:        NodeId,
    to:          NodeId,
    length_m:    f64,
    speed_limit: SpeedLimit,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), osm_ids: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            osm_ids:   Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).  The node's
    /// source id is its index.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let osm_id = self.nodes.len() as i64;
        self.add_osm_node(osm_id, pos)
    }

    /// Add a node loaded from OSM, remembering its OSM id.
    pub fn add_osm_node(&mut self, osm_id: i64, pos: GeoPoint) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(pos);
        self.osm_ids.push(osm_id);
        id
    }

    /// Add a **directed** edge from `from` to `to`.  Adding the same pair
    /// again creates a parallel edge.
    pub fn add_directed_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        length_m: f64,
        speed_limit: SpeedLimit,
    ) {
        self.raw_edges.push(RawEdge { from, to, length_m, speed_limit });
    }

    /// Add edges in **both directions** for a two-way road.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f64, speed_limit: SpeedLimit) {
        self.add_directed_edge(a, b, length_m, speed_limit.clone());
        self.add_directed_edge(b, a, length_m, speed_limit);
    }

    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Build with the default calculator (20 km/h fallback speed).
    pub fn build(self) -> RoadNetwork {
        self.build_weighted(&EdgeWeightCalculator::default())
    }

    /// Consume the builder, weight every edge once, and produce a
    /// [`RoadNetwork`].
    pub fn build_weighted(self, calculator: &EdgeWeightCalculator) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable: parallel edges keep insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| (e.from.0, e.to.0));

        let mut edge_from        = Vec::with_capacity(edge_count);
        let mut edge_to          = Vec::with_capacity(edge_count);
        let mut edge_parallel    = Vec::with_capacity(edge_count);
        let mut edge_length_m    = Vec::with_capacity(edge_count);
        let mut edge_speed_limit = Vec::with_capacity(edge_count);
        let mut edge_speed_kmh   = Vec::with_capacity(edge_count);
        let mut edge_travel_secs = Vec::with_capacity(edge_count);
        let mut edge_speed_source = Vec::with_capacity(edge_count);
        let mut node_out_start   = vec![0u32; node_count + 1];
        let mut stats            = WeightingStats::default();

        let mut prev: Option<(NodeId, NodeId)> = None;
        let mut parallel = 0u32;

        for e in raw {
            parallel = match prev {
                Some(pair) if pair == (e.from, e.to) => parallel + 1,
                _ => 0,
            };
            prev = Some((e.from, e.to));

            let key = SegmentKey { from: e.from, to: e.to, parallel };
            let weighted = calculator.compute_weight(&Segment {
                key,
                length_m: e.length_m,
                speed_limit: &e.speed_limit,
            });
            stats.record(&weighted);

            node_out_start[e.from.index() + 1] += 1;
            edge_from.push(e.from);
            edge_to.push(e.to);
            edge_parallel.push(parallel);
            edge_length_m.push(e.length_m);
            edge_speed_limit.push(e.speed_limit);
            edge_speed_kmh.push(weighted.speed_kmh);
            edge_travel_secs.push(weighted.travel_time_secs);
            edge_speed_source.push(weighted.speed_source);
        }

        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        stats.log(calculator.default_speed_kmh);

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId::from_index(i),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_osm_id: self.osm_ids,
            node_out_start,
            edge_from,
            edge_to,
            edge_parallel,
            edge_length_m,
            edge_speed_limit,
            edge_speed_kmh,
            edge_travel_secs,
            edge_speed_source,
            stats,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
