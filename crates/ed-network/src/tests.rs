//! Unit tests for ed-network.
//!
//! All tests use hand-crafted graphs so they run without any input files.

#[cfg(test)]
mod helpers {
    use ed_core::{EdgeId, GeoPoint, OsmNodeId, WayId};
    use crate::{EdgeAttrs, PrimalGraph, PrimalGraphBuilder};

    /// A four-way-ish junction around node 2.
    ///
    /// ```text
    ///        4
    ///        ^
    ///        |
    ///  1 <-> 2 -> 3
    /// ```
    ///
    /// Edges (id: from→to, ways):
    ///   0: 1→2 {10}
    ///   1: 2→1 {10}
    ///   2: 2→3 {20, 21}
    ///   3: 2→4 {30}
    pub fn junction() -> (PrimalGraph, [EdgeId; 4]) {
        let mut b = PrimalGraphBuilder::new();
        b.add_node(OsmNodeId(1), GeoPoint::new(0.0, 0.0)).unwrap();
        b.add_node(OsmNodeId(2), GeoPoint::new(0.0, 0.001)).unwrap();
        b.add_node(OsmNodeId(3), GeoPoint::new(0.0, 0.002)).unwrap();
        b.add_node(OsmNodeId(4), GeoPoint::new(0.001, 0.001)).unwrap();

        let a = b.add_edge(OsmNodeId(1), OsmNodeId(2), EdgeAttrs::new(100.0, 50.0, [WayId(10)])).unwrap();
        let r = b.add_edge(OsmNodeId(2), OsmNodeId(1), EdgeAttrs::new(100.0, 50.0, [WayId(10)])).unwrap();
        let c = b
            .add_edge(OsmNodeId(2), OsmNodeId(3), EdgeAttrs::new(100.0, 50.0, [WayId(21), WayId(20)]))
            .unwrap();
        let d = b.add_edge(OsmNodeId(2), OsmNodeId(4), EdgeAttrs::new(100.0, 50.0, [WayId(30)])).unwrap();
        (b.build(), [a, r, c, d])
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ed_core::{EdgeId, GeoPoint, OsmNodeId, WayId};
    use crate::{EdgeAttrs, NetworkError, PrimalGraph, PrimalGraphBuilder};

    #[test]
    fn empty_build() {
        let g = PrimalGraph::empty();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn graph_is_debug() {
        let (g, _) = super::helpers::junction();
        let s = format!("{g:?}");
        assert!(s.starts_with("PrimalGraph"));
        assert!(s.contains("node_pos"));
    }

    #[test]
    fn edge_ids_follow_input_order() {
        let (g, [a, r, c, d]) = super::helpers::junction();
        assert_eq!([a, r, c, d], [EdgeId(0), EdgeId(1), EdgeId(2), EdgeId(3)]);
        assert_eq!(g.edge_count(), 4);
        let n1 = g.node_index(OsmNodeId(1)).unwrap();
        let n2 = g.node_index(OsmNodeId(2)).unwrap();
        assert_eq!(g.endpoints(a), (n1, n2));
        assert_eq!(g.endpoints(r), (n2, n1));
    }

    #[test]
    fn in_and_out_adjacency() {
        let (g, [a, r, c, d]) = super::helpers::junction();
        let n2 = g.node_index(OsmNodeId(2)).unwrap();
        assert_eq!(g.in_edges(n2), &[a]);
        assert_eq!(g.out_edges(n2), &[r, c, d]);
        assert_eq!(g.in_degree(n2), 1);
        assert_eq!(g.out_degree(n2), 3);

        let n3 = g.node_index(OsmNodeId(3)).unwrap();
        assert_eq!(g.out_degree(n3), 0);
        assert_eq!(g.in_edges(n3), &[c]);
    }

    #[test]
    fn adjacency_is_consistent_with_endpoints() {
        let (g, _) = super::helpers::junction();
        for n in g.nodes() {
            for &e in g.out_edges(n) {
                assert_eq!(g.edge_from[e.index()], n);
            }
            for &e in g.in_edges(n) {
                assert_eq!(g.edge_to[e.index()], n);
            }
        }
        let total_out: usize = g.nodes().map(|n| g.out_degree(n)).sum();
        let total_in: usize = g.nodes().map(|n| g.in_degree(n)).sum();
        assert_eq!(total_out, g.edge_count());
        assert_eq!(total_in, g.edge_count());
    }

    #[test]
    fn way_ids_sorted_and_member() {
        let (g, [_, _, c, _]) = super::helpers::junction();
        assert_eq!(g.way_ids(c), &[WayId(20), WayId(21)]);
        assert!(g.has_way(c, WayId(20)));
        assert!(g.has_way(c, WayId(21)));
        assert!(!g.has_way(c, WayId(10)));
    }

    #[test]
    fn duplicate_way_ids_collapse() {
        let mut b = PrimalGraphBuilder::new();
        b.add_node(OsmNodeId(1), GeoPoint::new(0.0, 0.0)).unwrap();
        b.add_node(OsmNodeId(2), GeoPoint::new(0.0, 1.0)).unwrap();
        let e = b
            .add_edge(OsmNodeId(1), OsmNodeId(2), EdgeAttrs::new(1.0, 1.0, [WayId(5), WayId(5)]))
            .unwrap();
        let g = b.build();
        assert_eq!(g.way_ids(e), &[WayId(5)]);
    }

    #[test]
    fn parallel_edges_get_distinct_ids() {
        let mut b = PrimalGraphBuilder::new();
        b.add_node(OsmNodeId(1), GeoPoint::new(0.0, 0.0)).unwrap();
        b.add_node(OsmNodeId(2), GeoPoint::new(0.0, 1.0)).unwrap();
        let e0 = b.add_edge(OsmNodeId(1), OsmNodeId(2), EdgeAttrs::default()).unwrap();
        let e1 = b.add_edge(OsmNodeId(1), OsmNodeId(2), EdgeAttrs::default()).unwrap();
        assert_ne!(e0, e1);
        let g = b.build();
        let n1 = g.node_index(OsmNodeId(1)).unwrap();
        assert_eq!(g.out_edges(n1), &[e0, e1]);
    }

    #[test]
    fn self_loop_rejected() {
        let mut b = PrimalGraphBuilder::new();
        b.add_node(OsmNodeId(1), GeoPoint::new(0.0, 0.0)).unwrap();
        let err = b.add_edge(OsmNodeId(1), OsmNodeId(1), EdgeAttrs::default());
        assert!(matches!(err, Err(NetworkError::SelfLoop(OsmNodeId(1)))));
    }

    #[test]
    fn unknown_node_rejected() {
        let mut b = PrimalGraphBuilder::new();
        b.add_node(OsmNodeId(1), GeoPoint::new(0.0, 0.0)).unwrap();
        let err = b.add_edge(OsmNodeId(1), OsmNodeId(9), EdgeAttrs::default());
        assert!(matches!(err, Err(NetworkError::UnknownNode(OsmNodeId(9)))));
    }

    #[test]
    fn duplicate_node_rejected() {
        let mut b = PrimalGraphBuilder::new();
        b.add_node(OsmNodeId(1), GeoPoint::new(0.0, 0.0)).unwrap();
        let err = b.add_node(OsmNodeId(1), GeoPoint::new(1.0, 1.0));
        assert!(matches!(err, Err(NetworkError::DuplicateNode(OsmNodeId(1)))));
    }

    #[test]
    fn missing_attrs_are_kept_as_none() {
        let mut b = PrimalGraphBuilder::new();
        b.add_node(OsmNodeId(1), GeoPoint::new(0.0, 0.0)).unwrap();
        b.add_node(OsmNodeId(2), GeoPoint::new(0.0, 1.0)).unwrap();
        let e = b.add_edge(OsmNodeId(1), OsmNodeId(2), EdgeAttrs::default()).unwrap();
        let g = b.build();
        assert_eq!(g.edge_length_m[e.index()], None);
        assert_eq!(g.edge_maxspeed_kmh[e.index()], None);
        assert!(g.way_ids(e).is_empty());
    }

    #[test]
    fn contains_edge_bounds() {
        let (g, _) = super::helpers::junction();
        assert!(g.contains_edge(EdgeId(3)));
        assert!(!g.contains_edge(EdgeId(4)));
        assert!(!g.contains_edge(EdgeId::INVALID));
    }
}
