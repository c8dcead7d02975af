//! Unit tests for ruta-spatial.
//!
//! All tests use hand-crafted networks or inline Overpass JSON so they run
//! without network access.

#[cfg(test)]
mod helpers {
    use ruta_core::{GeoPoint, NodeId};
    use crate::{EdgeWeightCalculator, RoadNetwork, RoadNetworkBuilder, SpeedLimit};

    /// Small network with a parallel-edge pair.
    ///
    /// Nodes (lat, lon):
    ///   0:(0,0)  1:(0,1)  2:(0,2)
    ///   3:(1,0)           4:(1,2)
    ///
    /// Two-way roads at the 20 km/h default unless noted:
    ///   0-1  500 m
    ///   1-2  500 m                 and a parallel 1→2 of 1000 m at "60" km/h
    ///   2-4  500 m
    ///   0-3  2000 m at "80" km/h
    ///   3-4  2000 m at "80" km/h
    ///
    /// Times (20 km/h = 5.556 m/s): 500 m → 90 s.  1000 m at 60 → 60 s.
    /// 2000 m at 80 → 90 s.
    ///   0→1→2→4 using the fast parallel: 90 + 60 + 90 = 240 s
    ///   0→3→4:                           90 + 90      = 180 s  ← fastest
    pub fn grid_network() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();

        let n0 = b.add_node(GeoPoint::new(0.0, 0.0));
        let n1 = b.add_node(GeoPoint::new(0.0, 1.0));
        let n2 = b.add_node(GeoPoint::new(0.0, 2.0));
        let n3 = b.add_node(GeoPoint::new(1.0, 0.0));
        let n4 = b.add_node(GeoPoint::new(1.0, 2.0));

        b.add_road(n0, n1, 500.0, SpeedLimit::Absent);
        b.add_road(n1, n2, 500.0, SpeedLimit::Absent);
        b.add_directed_edge(n1, n2, 1_000.0, SpeedLimit::from("60"));
        b.add_road(n2, n4, 500.0, SpeedLimit::Absent);
        b.add_road(n0, n3, 2_000.0, SpeedLimit::from("80"));
        b.add_road(n3, n4, 2_000.0, SpeedLimit::from("80"));

        (b.build_weighted(&EdgeWeightCalculator::new(20.0)), [n0, n1, n2, n3, n4])
    }

    pub fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }
}

// ── Speed parsing & weighting ─────────────────────────────────────────────────

#[cfg(test)]
mod weight {
    use ruta_core::NodeId;
    use super::helpers::approx;
    use crate::{
        EdgeWeightCalculator, Segment, SegmentKey, SpeedLimit, SpeedSource, parse_speed_kmh,
    };

    fn key() -> SegmentKey {
        SegmentKey { from: NodeId(0), to: NodeId(1), parallel: 0 }
    }

    fn weigh(length_m: f64, limit: SpeedLimit) -> crate::WeightedSegment {
        EdgeWeightCalculator::new(20.0).compute_weight(&Segment {
            key: key(),
            length_m,
            speed_limit: &limit,
        })
    }

    #[test]
    fn absent_uses_default() {
        let w = weigh(100.0, SpeedLimit::Absent);
        assert_eq!(w.speed_kmh, 20.0);
        assert_eq!(w.speed_source, SpeedSource::Untagged);
    }

    #[test]
    fn single_numeric_token() {
        assert_eq!(weigh(100.0, SpeedLimit::from("50")).speed_kmh, 50.0);
        assert_eq!(weigh(100.0, SpeedLimit::from("50 km/h")).speed_kmh, 50.0);
        assert_eq!(weigh(100.0, SpeedLimit::from("  30  mph")).speed_kmh, 30.0);
    }

    #[test]
    fn multiple_tokens_average() {
        assert_eq!(weigh(100.0, SpeedLimit::from(["40", "60"])).speed_kmh, 50.0);
        // Non-numeric tokens are ignored, numeric ones still averaged.
        assert_eq!(weigh(100.0, SpeedLimit::from(["40", "variable", "60"])).speed_kmh, 50.0);
    }

    #[test]
    fn unparseable_falls_back_to_default() {
        for limit in [
            SpeedLimit::from("variable"),
            SpeedLimit::from("50km/h"),
            SpeedLimit::from("-30"),
            SpeedLimit::from("12.5"),
            SpeedLimit::from(""),
            SpeedLimit::from(["none", "signals"]),
            SpeedLimit::Multiple(vec![]),
        ] {
            let w = weigh(100.0, limit.clone());
            assert_eq!(w.speed_kmh, 20.0, "{limit:?}");
            assert_eq!(w.speed_source, SpeedSource::Unparsed, "{limit:?}");
        }
    }

    #[test]
    fn blank_token_discards_partial_results() {
        assert_eq!(parse_speed_kmh(&SpeedLimit::from(["60", "  "])), None);
        assert_eq!(parse_speed_kmh(&SpeedLimit::from(["", "60"])), None);
    }

    #[test]
    fn default_scenario_1000m() {
        let w = weigh(1_000.0, SpeedLimit::Absent);
        assert!(approx(w.travel_time_secs, 180.0), "{}", w.travel_time_secs);
    }

    #[test]
    fn unit_suffixed_pair_scenario_500m() {
        let w = weigh(500.0, SpeedLimit::from(["30 km/h", "50 km/h"]));
        assert_eq!(w.speed_kmh, 40.0);
        assert!(approx(w.travel_time_secs, 45.0), "{}", w.travel_time_secs);
    }

    #[test]
    fn zero_speed_is_infinite() {
        let w = weigh(100.0, SpeedLimit::from("0"));
        assert_eq!(w.speed_kmh, 0.0);
        assert!(w.travel_time_secs.is_infinite());
        // Zero-length, zero-speed is still infinite rather than NaN.
        assert!(weigh(0.0, SpeedLimit::from("0")).travel_time_secs.is_infinite());
        // Any positive speed gives a finite time.
        assert!(weigh(100.0, SpeedLimit::from("1")).travel_time_secs.is_finite());
    }

    #[test]
    fn time_monotone_in_length() {
        let mut last = -1.0;
        for len in [0.0, 1.0, 10.0, 250.0, 1_000.0, 50_000.0] {
            let t = weigh(len, SpeedLimit::from("45")).travel_time_secs;
            assert!(t >= last, "{len} m gave {t} after {last}");
            last = t;
        }
    }

    #[test]
    fn absurd_speed_used_as_is() {
        assert_eq!(weigh(100.0, SpeedLimit::from("999")).speed_kmh, 999.0);
    }

    #[test]
    fn custom_default() {
        let limit = SpeedLimit::Absent;
        let w = EdgeWeightCalculator::new(36.0).compute_weight(&Segment {
            key: key(),
            length_m: 100.0,
            speed_limit: &limit,
        });
        assert!(approx(w.travel_time_secs, 10.0));
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ruta_core::GeoPoint;
    use crate::{RoadNetworkBuilder, SpeedLimit, SpeedSource};

    #[test]
    fn empty_build() {
        let net = RoadNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(net.bounds().is_none());
    }

    #[test]
    fn every_edge_weighted_once() {
        let (net, _) = super::helpers::grid_network();
        assert_eq!(net.edge_count(), 11);
        assert_eq!(net.edge_speed_kmh.len(), net.edge_count());
        assert_eq!(net.edge_travel_secs.len(), net.edge_count());
        let stats = net.weighting_stats();
        assert_eq!(stats.segments, 11);
        assert_eq!(stats.tagged, 5);
        assert_eq!(stats.untagged, 6);
        assert_eq!(stats.unparsed, 0);
        assert_eq!(stats.defaulted(), 6);
    }

    #[test]
    fn parallel_edges_keyed_in_insertion_order() {
        let (net, [_, n1, n2, _, _]) = super::helpers::grid_network();
        let parallel: Vec<_> = net.edges_between(n1, n2).collect();
        assert_eq!(parallel.len(), 2);
        let first = net.weighted(parallel[0]);
        let second = net.weighted(parallel[1]);
        assert_eq!(first.key.parallel, 0);
        assert_eq!(first.length_m, 500.0);
        assert_eq!(second.key.parallel, 1);
        assert_eq!(second.length_m, 1_000.0);
        assert_eq!(second.speed_kmh, 60.0);
        assert_eq!(second.speed_source, SpeedSource::Tagged);
        // The reverse direction has only the two-way road.
        assert_eq!(net.edges_between(n2, n1).count(), 1);
    }

    #[test]
    fn edges_between_non_adjacent_is_empty() {
        let (net, [n0, _, _, _, n4]) = super::helpers::grid_network();
        assert_eq!(net.edges_between(n0, n4).count(), 0);
        assert_eq!(net.edges_between(ruta_core::NodeId(99), n4).count(), 0);
    }

    #[test]
    fn csr_out_edges() {
        let (net, [n0, n1, n2, n3, n4]) = super::helpers::grid_network();
        assert_eq!(net.out_degree(n0), 2);
        assert_eq!(net.out_degree(n1), 3); // n1→n0, n1→n2 twice
        assert_eq!(net.out_degree(n2), 2);
        assert_eq!(net.out_degree(n3), 2);
        assert_eq!(net.out_degree(n4), 2);
        for e in net.out_edges(n1) {
            assert_eq!(net.edge_from[e.index()], n1);
        }
    }

    #[test]
    fn raw_segment_preserved() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_osm_node(1001, GeoPoint::new(0.0, 0.0));
        let c = b.add_osm_node(1002, GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 100.0, SpeedLimit::from("variable"));
        let net = b.build();
        assert_eq!(net.node_osm_id, vec![1001, 1002]);
        let seg = net.segment(ruta_core::EdgeId(0));
        assert_eq!(seg.speed_limit, &SpeedLimit::from("variable"));
        assert_eq!(net.weighted(ruta_core::EdgeId(0)).speed_source, SpeedSource::Unparsed);
        assert_eq!(net.weighting_stats().unparsed, 1);
        assert_eq!(net.out_degree(c), 0);
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use ruta_core::GeoPoint;
    use crate::RoadNetworkBuilder;

    #[test]
    fn snap_exact_position() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        assert_eq!(net.snap_to_node(GeoPoint::new(0.0, 0.0)), Some(n0));
    }

    #[test]
    fn snap_nearest() {
        let (net, [n0, n1, ..]) = super::helpers::grid_network();
        assert_eq!(net.snap_to_node(GeoPoint::new(0.0, 0.4)), Some(n0));
        assert_eq!(net.snap_to_node(GeoPoint::new(0.1, 0.6)), Some(n1));
    }

    #[test]
    fn snap_measures_degrees_not_metres() {
        let mut b = RoadNetworkBuilder::new();
        let north = b.add_node(GeoPoint::new(60.0009, 0.0)); // ~100 m away
        let east = b.add_node(GeoPoint::new(60.0, 0.001)); // ~56 m away
        let net = b.build();
        let q = GeoPoint::new(60.0, 0.0);
        assert!(q.distance_m(net.node_pos[east.index()]) < q.distance_m(net.node_pos[north.index()]));
        assert_eq!(net.snap_to_node(q), Some(north));
    }

    #[test]
    fn empty_network_returns_none() {
        let net = RoadNetworkBuilder::new().build();
        assert!(net.snap_to_node(GeoPoint::new(0.0, 0.0)).is_none());
    }
}

// ── Dijkstra routing ──────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use ruta_core::{GeoPoint, NodeId};
    use super::helpers::approx;
    use crate::{DijkstraRouter, RoadNetworkBuilder, Router, SpatialError, SpeedLimit};

    #[test]
    fn trivial_same_node() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let r = DijkstraRouter.route(&net, n0, n0).unwrap();
        assert!(r.is_trivial());
        assert_eq!(r.nodes, vec![n0]);
        assert_eq!(r.total_travel_secs, 0.0);
    }

    #[test]
    fn fastest_not_shortest() {
        let (net, [n0, _, _, n3, n4]) = super::helpers::grid_network();
        let route = DijkstraRouter.route(&net, n0, n4).unwrap();
        assert_eq!(route.nodes, vec![n0, n3, n4]);
        assert!(approx(route.total_travel_secs, 180.0), "{}", route.total_travel_secs);
    }

    #[test]
    fn uses_fastest_parallel_edge() {
        let (net, [_, n1, n2, _, _]) = super::helpers::grid_network();
        let route = DijkstraRouter.route(&net, n1, n2).unwrap();
        assert_eq!(route.nodes, vec![n1, n2]);
        assert!(approx(route.total_travel_secs, 60.0));
    }

    #[test]
    fn no_route_disconnected() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(1.0, 0.0));
        let net = b.build();
        let result = DijkstraRouter.route(&net, a, c);
        assert!(matches!(result, Err(SpatialError::NoRoute { .. })));
    }

    #[test]
    fn directed_one_way_blocks_return() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_directed_edge(a, c, 100.0, SpeedLimit::Absent);
        let net = b.build();
        assert!(DijkstraRouter.route(&net, a, c).is_ok());
        assert!(matches!(DijkstraRouter.route(&net, c, a), Err(SpatialError::NoRoute { .. })));
    }

    #[test]
    fn zero_speed_edge_still_routes_at_infinite_cost() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let m = b.add_node(GeoPoint::new(0.0, 1.0));
        let c = b.add_node(GeoPoint::new(0.0, 2.0));
        b.add_directed_edge(a, m, 100.0, SpeedLimit::from("0"));
        b.add_directed_edge(m, c, 100.0, SpeedLimit::Absent);
        let net = b.build();
        assert_eq!(net.weighting_stats().impassable, 1);

        let route = DijkstraRouter.route(&net, a, c).unwrap();
        assert_eq!(route.nodes, vec![a, m, c]);
        assert!(route.total_travel_secs.is_infinite());

        let s = net.summarize(&route).unwrap();
        assert_eq!(s.hops.len(), 2);
        assert!(s.total_time_secs.is_infinite());
        assert!(approx(s.total_distance_m, 200.0));
        // Only a missing segment means no route.
        assert!(matches!(DijkstraRouter.route(&net, c, a), Err(SpatialError::NoRoute { .. })));
    }

    #[test]
    fn finite_detour_beats_zero_speed_edge() {
        let mut b = RoadNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let m = b.add_node(GeoPoint::new(1.0, 1.0));
        let c = b.add_node(GeoPoint::new(0.0, 2.0));
        b.add_directed_edge(a, c, 100.0, SpeedLimit::from("0"));
        b.add_directed_edge(a, m, 5_000.0, SpeedLimit::Absent);
        b.add_directed_edge(m, c, 5_000.0, SpeedLimit::Absent);
        let net = b.build();

        let route = DijkstraRouter.route(&net, a, c).unwrap();
        assert_eq!(route.nodes, vec![a, m, c]);
        assert!(approx(route.total_travel_secs, 1_800.0), "{}", route.total_travel_secs);
    }

    #[test]
    fn unknown_node_is_not_no_route() {
        let (net, [n0, ..]) = super::helpers::grid_network();
        let result = DijkstraRouter.route(&net, n0, NodeId(42));
        assert!(matches!(result, Err(SpatialError::NodeNotFound(NodeId(42)))));
    }
}

// ── Route summaries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod summary {
    use std::cell::Cell;

    use ruta_core::NodeId;
    use super::helpers::approx;
    use crate::{
        DijkstraRouter, MissingEdgeError, Router, SegmentKey, SpeedSource, WeightedSegment,
        summarize,
    };

    fn seg(from: u32, to: u32, parallel: u32, length_m: f64, secs: f64) -> WeightedSegment {
        WeightedSegment {
            key: SegmentKey { from: NodeId(from), to: NodeId(to), parallel },
            length_m,
            speed_kmh: length_m / secs * 3.6,
            travel_time_secs: secs,
            speed_source: SpeedSource::Tagged,
        }
    }

    #[test]
    fn touches_n_minus_one_pairs() {
        let route = [NodeId(0), NodeId(1), NodeId(2), NodeId(3)];
        let calls = Cell::new(0);
        let s = summarize(&route, |u, v| {
            calls.set(calls.get() + 1);
            vec![seg(u.0, v.0, 0, 100.0, 10.0)]
        })
        .unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(s.hops.len(), 3);
        assert!(approx(s.total_distance_m, 300.0));
        assert!(approx(s.total_time_secs, 30.0));
    }

    #[test]
    fn selects_minimum_time_parallel() {
        let route = [NodeId(0), NodeId(1)];
        let s = summarize(&route, |u, v| {
            vec![
                seg(u.0, v.0, 0, 100.0, 30.0), // short but slow
                seg(u.0, v.0, 1, 400.0, 20.0), // long but fast
                seg(u.0, v.0, 2, 500.0, 25.0),
            ]
        })
        .unwrap();
        assert_eq!(s.hops[0].key.parallel, 1);
        assert!(approx(s.total_distance_m, 400.0));
        assert!(approx(s.total_time_secs, 20.0));
    }

    #[test]
    fn tie_keeps_first() {
        let route = [NodeId(0), NodeId(1)];
        let s = summarize(&route, |u, v| {
            vec![seg(u.0, v.0, 0, 100.0, 20.0), seg(u.0, v.0, 1, 300.0, 20.0)]
        })
        .unwrap();
        assert_eq!(s.hops[0].key.parallel, 0);
    }

    #[test]
    fn missing_edge_fails() {
        let route = [NodeId(0), NodeId(1), NodeId(2)];
        let err = summarize(&route, |u, v| {
            if v == NodeId(2) { vec![] } else { vec![seg(u.0, v.0, 0, 100.0, 10.0)] }
        })
        .unwrap_err();
        assert_eq!(err, MissingEdgeError { from: NodeId(1), to: NodeId(2) });
    }

    #[test]
    fn single_node_route_is_zero() {
        let s = summarize(&[NodeId(5)], |_, _| Vec::<WeightedSegment>::new()).unwrap();
        assert_eq!(s.total_distance_m, 0.0);
        assert_eq!(s.total_time_secs, 0.0);
        assert!(s.hops.is_empty());
    }

    #[test]
    fn network_summary_matches_search_cost() {
        let (net, [_, n1, n2, _, n4]) = super::helpers::grid_network();
        let route = DijkstraRouter.route(&net, n1, n4).unwrap();
        assert_eq!(route.nodes, vec![n1, n2, n4]);
        let s = net.summarize(&route).unwrap();
        // The 1000 m / 60 km/h parallel beats the 500 m / 20 km/h one.
        assert!(approx(s.total_distance_m, 1_500.0), "{}", s.total_distance_m);
        assert!(approx(s.total_time_secs, route.total_travel_secs));
        assert!(approx(s.total_time_minutes(), 2.5));
        assert!(approx(s.total_distance_km(), 1.5));
    }

    #[test]
    fn network_summary_of_foreign_route_fails() {
        let (net, [n0, _, _, _, n4]) = super::helpers::grid_network();
        let route = crate::Route { nodes: vec![n0, n4], total_travel_secs: 0.0 };
        assert!(net.summarize(&route).is_err());
    }
}

// ── OSM loading ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod osm {
    use crate::osm::{Direction, direction, is_drivable, overpass, speed_limit_from_tag};
    use crate::{DijkstraRouter, Router, SpatialError, SpeedLimit};

    fn tags<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<&'a str> + Copy {
        move |k: &str| pairs.iter().find(|(key, _)| *key == k).map(|(_, v)| *v)
    }

    #[test]
    fn drivable_filter() {
        assert!(is_drivable(tags(&[("highway", "residential")])));
        assert!(is_drivable(tags(&[("highway", "primary"), ("service", "bus")])));
        assert!(!is_drivable(tags(&[("name", "no highway tag")])));
        assert!(!is_drivable(tags(&[("highway", "footway")])));
        assert!(!is_drivable(tags(&[("highway", "service")])));
        assert!(!is_drivable(tags(&[("highway", "residential"), ("area", "yes")])));
        assert!(!is_drivable(tags(&[("highway", "residential"), ("motor_vehicle", "no")])));
        assert!(!is_drivable(tags(&[("highway", "unclassified"), ("service", "driveway")])));
        assert!(!is_drivable(tags(&[("highway", "residential"), ("access", "private")])));
        assert!(is_drivable(tags(&[("highway", "residential"), ("access", "destination")])));
    }

    #[test]
    fn oneway_rules() {
        assert_eq!(direction(tags(&[("highway", "residential")])), Direction::Both);
        assert_eq!(direction(tags(&[("oneway", "yes")])), Direction::Forward);
        assert_eq!(direction(tags(&[("oneway", "-1")])), Direction::Backward);
        assert_eq!(direction(tags(&[("junction", "roundabout")])), Direction::Forward);
        assert_eq!(direction(tags(&[("highway", "motorway")])), Direction::Forward);
        assert_eq!(direction(tags(&[("highway", "motorway"), ("oneway", "no")])), Direction::Both);
    }

    #[test]
    fn maxspeed_tag_shapes() {
        assert_eq!(speed_limit_from_tag("50"), SpeedLimit::from("50"));
        assert_eq!(speed_limit_from_tag("40;60"), SpeedLimit::from("40;60"));
    }

    #[test]
    fn semicolon_maxspeed_falls_back_to_default() {
        let json = r#"{"elements": [
            {"type": "node", "id": 1, "lat": 17.0600, "lon": -96.7200},
            {"type": "node", "id": 2, "lat": 17.0610, "lon": -96.7200},
            {"type": "way", "id": 10, "nodes": [1, 2],
             "tags": {"highway": "primary", "oneway": "yes", "maxspeed": "40;60"}}
        ]}"#;
        let net = overpass::load_from_str(json).unwrap().build();
        let w = net.weighted(ruta_core::EdgeId(0));
        assert_eq!(w.speed_kmh, 20.0);
        assert_eq!(w.speed_source, crate::SpeedSource::Unparsed);
    }

    const SAMPLE: &str = r#"{
      "version": 0.6,
      "elements": [
        {"type": "node", "id": 1, "lat": 17.0600, "lon": -96.7200},
        {"type": "node", "id": 2, "lat": 17.0610, "lon": -96.7200},
        {"type": "node", "id": 3, "lat": 17.0620, "lon": -96.7200},
        {"type": "node", "id": 4, "lat": 17.0620, "lon": -96.7210},
        {"type": "way", "id": 10, "nodes": [1, 2, 3],
         "tags": {"highway": "primary", "maxspeed": "50 km/h"}},
        {"type": "way", "id": 11, "nodes": [3, 4],
         "tags": {"highway": "residential", "oneway": "yes", "maxspeed": ["30", "50"]}},
        {"type": "way", "id": 12, "nodes": [2, 3],
         "tags": {"highway": "tertiary", "maxspeed": 60, "oneway": "yes"}},
        {"type": "way", "id": 13, "nodes": [1, 4],
         "tags": {"highway": "footway"}},
        {"type": "way", "id": 14, "nodes": [4, 99],
         "tags": {"highway": "residential"}},
        {"type": "relation", "id": 50, "members": []}
      ]
    }"#;

    #[test]
    fn overpass_sample() {
        let net = overpass::load_from_str(SAMPLE).unwrap().build();
        // Node 99 is unknown and the footway is filtered out.
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.node_osm_id, vec![1, 2, 3, 4]);
        // 1-2 and 2-3 both ways, 3→4 one-way, extra 2→3 one-way.
        assert_eq!(net.edge_count(), 6);

        let (n2, n3, n4) = (ruta_core::NodeId(1), ruta_core::NodeId(2), ruta_core::NodeId(3));
        let parallel: Vec<_> = net.edges_between(n2, n3).map(|e| net.weighted(e)).collect();
        assert_eq!(parallel.len(), 2);
        assert_eq!(parallel[0].speed_kmh, 50.0);
        assert_eq!(parallel[1].speed_kmh, 60.0);
        assert!((parallel[0].length_m - 111.2).abs() < 1.0, "{}", parallel[0].length_m);

        let to_4: Vec<_> = net.edges_between(n3, n4).map(|e| net.weighted(e)).collect();
        assert_eq!(to_4.len(), 1);
        assert_eq!(to_4[0].speed_kmh, 40.0);
        assert_eq!(net.edges_between(n4, n3).count(), 0);
    }

    #[test]
    fn overpass_route_end_to_end() {
        let net = overpass::load_from_str(SAMPLE).unwrap().build();
        let from = net.snap_to_node(ruta_core::GeoPoint::new(17.0601, -96.7201)).unwrap();
        let to = net.snap_to_node(ruta_core::GeoPoint::new(17.0621, -96.7211)).unwrap();
        let route = DijkstraRouter.route(&net, from, to).unwrap();
        assert_eq!(route.nodes.len(), 4);
        let s = net.summarize(&route).unwrap();
        assert_eq!(s.hops.len(), 3);
        // 2→3 uses the 60 km/h way rather than the 50 km/h one.
        assert_eq!(s.hops[1].speed_kmh, 60.0);
        assert!((s.total_time_secs - route.total_travel_secs).abs() < 1e-9);
    }

    #[test]
    fn overpass_rejects_invalid_json() {
        assert!(matches!(overpass::load_from_str("{\"elements\": 5}"), Err(SpatialError::Json(_))));
    }

    #[test]
    fn overpass_missing_file_is_io_error() {
        let result = overpass::load_from_file(std::path::Path::new("/nonexistent/ruta.json"));
        assert!(matches!(result, Err(SpatialError::Io(_))));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn overpass_ql_for_places() {
        use crate::osm::fetch::OverpassQuery;
        let q = OverpassQuery::Places(vec![
            "Oaxaca de Juárez, Oaxaca, Mexico".into(),
            "Santa Cruz Xoxocotlán, Oaxaca, Mexico".into(),
        ]);
        let ql = q.to_overpass_ql(60);
        assert!(ql.starts_with("[out:json][timeout:60];"));
        assert!(ql.contains(r#"area["name"="Oaxaca de Juárez"]["boundary"="administrative"]->.a0;"#));
        assert!(ql.contains(r#"area["name"="Santa Cruz Xoxocotlán"]["boundary"="administrative"]->.a1;"#));
        assert!(ql.contains("(area.a1);"));
        assert!(ql.ends_with("out body;\n"));
    }
}
