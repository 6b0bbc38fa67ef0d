//! Edge-dual graph builder.
//!
//! The dual graph's vertices are primal edges; its edges are legal
//! transitions.  For each primal node `n` the candidates are
//! `in_edges(n) × out_edges(n)`; a candidate survives unless
//!
//! - `incoming == outgoing` (same edge id, only possible through a
//!   self-loop, which the graph builder already rejects), or
//! - the pair is in the forbidden-turn set.
//!
//! A reverse edge is a *different* id, so a 1→2 / 2→1 pair is kept.
//!
//! Work is local to each node (in-degree × out-degree), so nodes can be
//! enumerated independently.  Survivors are then sorted and deduplicated,
//! which gives set semantics plus an output order that is identical with or
//! without the `parallel` feature.

use log::{debug, info};

use ed_core::{EdgeId, NodeId};
use ed_network::PrimalGraph;

use crate::restriction::ForbiddenTurns;

// ── DualEdge ──────────────────────────────────────────────────────────────────

/// A legal transition: `incoming`'s target is `outgoing`'s source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DualEdge {
    pub incoming: EdgeId,
    pub outgoing: EdgeId,
}

impl DualEdge {
    #[inline]
    pub fn new(incoming: EdgeId, outgoing: EdgeId) -> Self {
        Self { incoming, outgoing }
    }
}

// ── DualGraph ─────────────────────────────────────────────────────────────────

/// Deduplicated dual edges, ascending by `(incoming, outgoing)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DualGraph {
    edges: Vec<DualEdge>,
}

impl DualGraph {
    /// Collect arbitrary pairs into a dual graph, sorting and deduplicating.
    pub fn from_edges(mut edges: Vec<DualEdge>) -> Self {
        edges.sort_unstable();
        edges.dedup();
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edges(&self) -> &[DualEdge] {
        &self.edges
    }

    /// Binary search on the sorted edge list.
    pub fn contains(&self, incoming: EdgeId, outgoing: EdgeId) -> bool {
        self.edges.binary_search(&DualEdge::new(incoming, outgoing)).is_ok()
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

/// Legal transitions through a single node.
fn transitions_at(graph: &PrimalGraph, forbidden: &ForbiddenTurns, node: NodeId) -> Vec<DualEdge> {
    let incoming = graph.in_edges(node);
    let outgoing = graph.out_edges(node);
    let mut out = Vec::with_capacity(incoming.len() * outgoing.len());
    for &a in incoming {
        for &b in outgoing {
            if a != b && !forbidden.contains(a, b) {
                out.push(DualEdge::new(a, b));
            }
        }
    }
    out
}

/// Build the dual graph of `graph`, excluding U-turns onto the identical
/// edge and every forbidden pair.
pub fn build_dual_graph(graph: &PrimalGraph, forbidden: &ForbiddenTurns) -> DualGraph {
    #[cfg(not(feature = "parallel"))]
    let edges: Vec<DualEdge> = graph
        .nodes()
        .flat_map(|n| transitions_at(graph, forbidden, n))
        .collect();

    #[cfg(feature = "parallel")]
    let mut edges: Vec<DualEdge> = {
        use rayon::prelude::*;
        (0..graph.node_count() as u32)
            .into_par_iter()
            .flat_map_iter(|n| transitions_at(graph, forbidden, NodeId(n)))
            .collect()
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::slice::ParallelSliceMut;
        edges.par_sort_unstable();
    }

    let widest = graph
        .nodes()
        .map(|n| graph.in_degree(n) * graph.out_degree(n))
        .max()
        .unwrap_or(0);
    debug!("widest junction has {widest} candidate transitions");

    let dual = DualGraph::from_edges(edges);
    info!("dual graph: {} transitions over {} edges", dual.len(), graph.edge_count());
    dual
}
