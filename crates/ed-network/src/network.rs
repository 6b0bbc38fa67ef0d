//! Primal road graph and builder.
//!
//! # Data layout
//!
//! Edges live in an arena indexed by `EdgeId`, in the order they were added
//! (the edge id *is* the upstream input position).  Per-edge attributes are
//! parallel `Vec`s: `edge_from`, `edge_to`, `edge_length_m`,
//! `edge_maxspeed_kmh`.
//!
//! Adjacency is stored twice in **Compressed Sparse Row (CSR)** form, once
//! per direction.  Given a `NodeId n`:
//!
//! ```text
//! out_list[ out_start[n] .. out_start[n+1] ]   edges whose source is n
//! in_list [ in_start[n]  .. in_start[n+1]  ]   edges whose target is n
//! ```
//!
//! Both indices are built once in [`PrimalGraphBuilder::build`] and never
//! mutated afterwards, so per-node work can run on many threads at once
//! against a shared `&PrimalGraph`.  Within a node's slice, edge ids are in
//! ascending order.
//!
//! # Way ids
//!
//! After simplification one edge may stand for a merged run of several
//! original ways.  Their ids are kept in a flat arena (`way_start` /
//! `way_list`, CSR again), sorted and deduplicated per edge so membership is
//! a binary search.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as IdMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as IdMap;

use log::debug;

use ed_core::{EdgeId, GeoPoint, NodeId, OsmNodeId, WayId};

use crate::{NetworkError, NetworkResult};

// ── EdgeAttrs ─────────────────────────────────────────────────────────────────

/// Attributes supplied for each directed edge by the upstream collaborator.
///
/// `length_m` and `maxspeed_kmh` are optional here because the graph itself
/// does not need them; the compiler rejects an edge missing either when it
/// computes costs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeAttrs {
    pub length_m:     Option<f64>,
    pub maxspeed_kmh: Option<f64>,
    pub way_ids:      Vec<WayId>,
}

impl EdgeAttrs {
    pub fn new(length_m: f64, maxspeed_kmh: f64, way_ids: impl IntoIterator<Item = WayId>) -> Self {
        Self {
            length_m:     Some(length_m),
            maxspeed_kmh: Some(maxspeed_kmh),
            way_ids:      way_ids.into_iter().collect(),
        }
    }
}

// ── PrimalGraph ───────────────────────────────────────────────────────────────

/// Directed primal road graph: edge arena plus read-only in/out adjacency.
///
/// Fields are `pub` for direct indexed access on hot paths.  Do not construct
/// directly; use [`PrimalGraphBuilder`].
#[derive(Debug)]
pub struct PrimalGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// External id of each node.  Indexed by `NodeId`.
    pub node_osm: Vec<OsmNodeId>,

    osm_index: IdMap<OsmNodeId, NodeId>,

    // ── Adjacency ─────────────────────────────────────────────────────────
    /// CSR row pointer for outgoing edges.  Length = `node_count + 1`.
    pub out_start: Vec<u32>,
    pub out_list:  Vec<EdgeId>,

    /// CSR row pointer for incoming edges.  Length = `node_count + 1`.
    pub in_start: Vec<u32>,
    pub in_list:  Vec<EdgeId>,

    // ── Edge data (indexed by EdgeId = input order) ───────────────────────
    pub edge_from:         Vec<NodeId>,
    pub edge_to:           Vec<NodeId>,
    pub edge_length_m:     Vec<Option<f64>>,
    pub edge_maxspeed_kmh: Vec<Option<f64>>,

    way_start: Vec<u32>,
    way_list:  Vec<WayId>,
}

impl PrimalGraph {
    /// Construct an empty graph with no nodes or edges.
    pub fn empty() -> Self {
        PrimalGraphBuilder::new().build()
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

    /// Iterator over every node in index order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        (0..self.node_count() as u32).map(NodeId)
    }

    /// Iterator over every edge in id order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeId> + '_ {
        (0..self.edge_count() as u32).map(EdgeId)
    }

    /// `true` if `edge` is a valid index into the edge arena.
    #[inline]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        edge.index() < self.edge_count()
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Resolve an external node id to its arena index.
    pub fn node_index(&self, osm: OsmNodeId) -> Option<NodeId> {
        self.osm_index.get(&osm).copied()
    }

    pub fn pos(&self, node: NodeId) -> GeoPoint {
        self.node_pos[node.index()]
    }

    /// `(source, target)` of `edge`.
    #[inline]
    pub fn endpoints(&self, edge: EdgeId) -> (NodeId, NodeId) {
        (self.edge_from[edge.index()], self.edge_to[edge.index()])
    }

    /// Sorted, deduplicated original way ids of `edge`.
    #[inline]
    pub fn way_ids(&self, edge: EdgeId) -> &[WayId] {
        let start = self.way_start[edge.index()] as usize;
        let end   = self.way_start[edge.index() + 1] as usize;
        &self.way_list[start..end]
    }

    /// Set-membership test: does `edge` represent (part of) `way`?
    #[inline]
    pub fn has_way(&self, edge: EdgeId, way: WayId) -> bool {
        self.way_ids(edge).binary_search(&way).is_ok()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Edges whose source is `node`, ascending by id.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> &[EdgeId] {
        let start = self.out_start[node.index()] as usize;
        let end   = self.out_start[node.index() + 1] as usize;
        &self.out_list[start..end]
    }

    /// Edges whose target is `node`, ascending by id.
    #[inline]
    pub fn in_edges(&self, node: NodeId) -> &[EdgeId] {
        let start = self.in_start[node.index()] as usize;
        let end   = self.in_start[node.index() + 1] as usize;
        &self.in_list[start..end]
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_edges(node).len()
    }

    #[inline]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_edges(node).len()
    }
}

// ── PrimalGraphBuilder ────────────────────────────────────────────────────────

/// Construct a [`PrimalGraph`] incrementally, then call [`build`](Self::build).
///
/// Nodes must be added before the edges that reference them.  Edge ids are
/// handed out sequentially in call order.
///
/// # Example
///
/// ```
/// use ed_core::{GeoPoint, OsmNodeId, WayId};
/// use ed_network::{EdgeAttrs, PrimalGraphBuilder};
///
/// let mut b = PrimalGraphBuilder::new();
/// b.add_node(OsmNodeId(1), GeoPoint::new(38.25, -85.76)).unwrap();
/// b.add_node(OsmNodeId(2), GeoPoint::new(38.26, -85.75)).unwrap();
/// let e = b
///     .add_edge(OsmNodeId(1), OsmNodeId(2), EdgeAttrs::new(1_200.0, 50.0, [WayId(10)]))
///     .unwrap();
/// let g = b.build();
/// assert_eq!(g.edge_count(), 1);
/// assert!(g.has_way(e, WayId(10)));
/// ```
pub struct PrimalGraphBuilder {
    nodes:     Vec<GeoPoint>,
    node_osm:  Vec<OsmNodeId>,
    osm_index: IdMap<OsmNodeId, NodeId>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:  NodeId,
    to:    NodeId,
    attrs: EdgeAttrs,
}

impl PrimalGraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes:     Vec::new(),
            node_osm:  Vec::new(),
            osm_index: IdMap::default(),
            raw_edges: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut osm_index = IdMap::default();
        osm_index.reserve(nodes);
        Self {
            nodes:     Vec::with_capacity(nodes),
            node_osm:  Vec::with_capacity(nodes),
            osm_index,
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, osm: OsmNodeId, pos: GeoPoint) -> NetworkResult<NodeId> {
        if self.osm_index.contains_key(&osm) {
            return Err(NetworkError::DuplicateNode(osm));
        }
        let id = NodeId(
            u32::try_from(self.nodes.len())
                .map_err(|_| NetworkError::Capacity { what: "nodes", max: u32::MAX })?,
        );
        self.nodes.push(pos);
        self.node_osm.push(osm);
        self.osm_index.insert(osm, id);
        Ok(id)
    }

    /// Add a **directed** edge and return its `EdgeId` (sequential from 0).
    ///
    /// Parallel edges between the same ordered node pair are allowed; each
    /// gets its own id.  Self-loops are rejected.
    pub fn add_edge(
        &mut self,
        from:  OsmNodeId,
        to:    OsmNodeId,
        attrs: EdgeAttrs,
    ) -> NetworkResult<EdgeId> {
        if from == to {
            return Err(NetworkError::SelfLoop(from));
        }
        let from_id = self.lookup(from)?;
        let to_id   = self.lookup(to)?;
        let id = EdgeId(
            u32::try_from(self.raw_edges.len())
                .map_err(|_| NetworkError::Capacity { what: "edges", max: u32::MAX })?,
        );
        self.raw_edges.push(RawEdge { from: from_id, to: to_id, attrs });
        Ok(id)
    }

    fn lookup(&self, osm: OsmNodeId) -> NetworkResult<NodeId> {
        self.osm_index.get(&osm).copied().ok_or(NetworkError::UnknownNode(osm))
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`PrimalGraph`].
    ///
    /// Time complexity: O(N + E + W log W): two counting sorts for the
    /// adjacency indices plus a per-edge sort of its way ids.
    pub fn build(self) -> PrimalGraph {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        let (out_start, out_list) = csr(node_count, self.raw_edges.iter().map(|e| e.from));
        let (in_start, in_list)   = csr(node_count, self.raw_edges.iter().map(|e| e.to));

        let mut edge_from         = Vec::with_capacity(edge_count);
        let mut edge_to           = Vec::with_capacity(edge_count);
        let mut edge_length_m     = Vec::with_capacity(edge_count);
        let mut edge_maxspeed_kmh = Vec::with_capacity(edge_count);
        let mut way_start         = Vec::with_capacity(edge_count + 1);
        let mut way_list          = Vec::new();

        way_start.push(0u32);
        for raw in self.raw_edges {
            edge_from.push(raw.from);
            edge_to.push(raw.to);
            edge_length_m.push(raw.attrs.length_m);
            edge_maxspeed_kmh.push(raw.attrs.maxspeed_kmh);

            let mut ways = raw.attrs.way_ids;
            ways.sort_unstable();
            ways.dedup();
            way_list.extend(ways);
            way_start.push(way_list.len() as u32);
        }

        debug!(
            "primal graph built: {node_count} nodes, {edge_count} edges, {} way refs",
            way_list.len()
        );

        PrimalGraph {
            node_pos: self.nodes,
            node_osm: self.node_osm,
            osm_index: self.osm_index,
            out_start,
            out_list,
            in_start,
            in_list,
            edge_from,
            edge_to,
            edge_length_m,
            edge_maxspeed_kmh,
            way_start,
            way_list,
        }
    }
}

impl Default for PrimalGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Counting-sort edge ids into a CSR keyed by `keys[e]` (one key per edge,
/// in edge-id order).  Ids within a row come out ascending.
fn csr(node_count: usize, keys: impl Iterator<Item = NodeId> + Clone) -> (Vec<u32>, Vec<EdgeId>) {
    let mut start = vec![0u32; node_count + 1];
    for n in keys.clone() {
        start[n.index() + 1] += 1;
    }
    for i in 1..=node_count {
        start[i] += start[i - 1];
    }

    let mut cursor = start.clone();
    let mut list   = vec![EdgeId::INVALID; start[node_count] as usize];
    for (e, n) in keys.enumerate() {
        let slot = &mut cursor[n.index()];
        list[*slot as usize] = EdgeId(e as u32);
        *slot += 1;
    }
    (start, list)
}
