//! Hierarchical locality tagger.
//!
//! Each edge gets the cell of its target (`incoming_cell`, the junction it
//! leads into) and of its source (`outgoing_cell`) at the finest configured
//! resolution.  Its **locality** is the finest level at which those two cells
//! share an ancestor, found by walking levels from the finest down to 0.
//!
//! - A low level means the endpoints separate early in the hierarchy: the
//!   edge matters at a broad scale and a long-distance router must keep it.
//! - A high level means a strictly local edge.
//!
//! The value depends only on the edge's own endpoints, never on the dual
//! graph.

use std::fmt;

use log::{info, warn};

use ed_core::EdgeId;
use ed_network::PrimalGraph;

use crate::spatial::{CellId, SpatialIndex};

// ── Locality ──────────────────────────────────────────────────────────────────

/// Locality resolution of an edge or transition.
///
/// Both sentinels serialise as `-1`; they are kept apart in memory because
/// they combine differently.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Locality {
    /// A cell could not be computed (invalid coordinates).
    Undefined,
    /// Valid cells with no common ancestor at any level.
    Disjoint,
    /// Finest level with a common ancestor.
    Level(u8),
}

impl Locality {
    /// Tabular value: `-1` for either sentinel, otherwise the level.
    pub fn as_i8(self) -> i8 {
        match self {
            Locality::Undefined | Locality::Disjoint => -1,
            Locality::Level(l) => l as i8,
        }
    }

    pub fn level(self) -> Option<u8> {
        match self {
            Locality::Level(l) => Some(l),
            _ => None,
        }
    }

    /// Locality of a transition between two edges: the finer of the two,
    /// since the pair is only usable where both edges are.
    ///
    /// `Undefined` is absorbing; otherwise `Disjoint` ranks below level 0.
    pub fn combine(self, other: Locality) -> Locality {
        match (self, other) {
            (Locality::Undefined, _) | (_, Locality::Undefined) => Locality::Undefined,
            (Locality::Disjoint, x) | (x, Locality::Disjoint) => x,
            (Locality::Level(a), Locality::Level(b)) => Locality::Level(a.max(b)),
        }
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// Finest level at which `a` and `b` share an ancestor.
///
/// Starts at the coarser of the two cells' own levels and walks towards 0.
/// Symmetric in its arguments.
pub fn lca_resolution<I: SpatialIndex + ?Sized>(
    index: &I,
    a:     Option<CellId>,
    b:     Option<CellId>,
) -> Locality {
    let (Some(a), Some(b)) = (a, b) else {
        return Locality::Undefined;
    };
    let (Some(res_a), Some(res_b)) = (index.resolution_of(a), index.resolution_of(b)) else {
        return Locality::Undefined;
    };

    let start = res_a.min(res_b);
    for level in (0..=start).rev() {
        if let (Some(pa), Some(pb)) = (index.parent_of(a, level), index.parent_of(b, level)) {
            if pa == pb {
                return Locality::Level(level);
            }
        }
    }
    Locality::Disjoint
}

// ── EdgeTags ──────────────────────────────────────────────────────────────────

/// Per-edge enrichment, indexed by `EdgeId` (structure of arrays).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeTags {
    /// Cell of the edge's target node.
    pub incoming_cell: Vec<Option<CellId>>,
    /// Cell of the edge's source node.
    pub outgoing_cell: Vec<Option<CellId>>,
    pub locality:      Vec<Locality>,
    /// Travel time in seconds.
    pub cost:          Vec<f64>,
}

impl EdgeTags {
    pub fn len(&self) -> usize {
        self.locality.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locality.is_empty()
    }

    #[inline]
    pub fn contains(&self, edge: EdgeId) -> bool {
        edge.index() < self.len()
    }

    /// Number of edges whose locality is `Undefined`.
    pub fn undefined_count(&self) -> usize {
        self.locality.iter().filter(|l| **l == Locality::Undefined).count()
    }

    /// Number of edges whose locality is `Disjoint`.
    pub fn disjoint_count(&self) -> usize {
        self.locality.iter().filter(|l| **l == Locality::Disjoint).count()
    }
}

struct Tag {
    incoming_cell: Option<CellId>,
    outgoing_cell: Option<CellId>,
    locality:      Locality,
}

fn tag_edge<I: SpatialIndex + ?Sized>(
    graph:      &PrimalGraph,
    index:      &I,
    resolution: u8,
    edge:       EdgeId,
) -> Tag {
    let (source, target) = graph.endpoints(edge);
    let cell = |p: ed_core::GeoPoint| p.is_valid().then(|| index.cell_of(p, resolution)).flatten();

    let incoming_cell = cell(graph.pos(target));
    let outgoing_cell = cell(graph.pos(source));
    Tag {
        incoming_cell,
        outgoing_cell,
        locality: lca_resolution(index, incoming_cell, outgoing_cell),
    }
}

/// Tag every edge with its endpoint cells and locality, attaching the
/// precomputed `costs` (indexed by `EdgeId`).
///
/// The caller checks `resolution <= index.max_resolution()`.
pub fn tag_edges<I: SpatialIndex + ?Sized>(
    graph:      &PrimalGraph,
    index:      &I,
    resolution: u8,
    costs:      Vec<f64>,
) -> EdgeTags {
    debug_assert_eq!(costs.len(), graph.edge_count());

    #[cfg(not(feature = "parallel"))]
    let tags: Vec<Tag> = graph
        .edges()
        .map(|e| tag_edge(graph, index, resolution, e))
        .collect();

    #[cfg(feature = "parallel")]
    let tags: Vec<Tag> = {
        use rayon::prelude::*;
        (0..graph.edge_count() as u32)
            .into_par_iter()
            .map(|e| tag_edge(graph, index, resolution, EdgeId(e)))
            .collect()
    };

    let mut out = EdgeTags {
        incoming_cell: Vec::with_capacity(tags.len()),
        outgoing_cell: Vec::with_capacity(tags.len()),
        locality:      Vec::with_capacity(tags.len()),
        cost:          costs,
    };
    for t in tags {
        out.incoming_cell.push(t.incoming_cell);
        out.outgoing_cell.push(t.outgoing_cell);
        out.locality.push(t.locality);
    }

    let undefined = out.undefined_count();
    info!(
        "tagged {} edges at resolution {resolution} ({} disjoint, {undefined} undefined)",
        out.len(),
        out.disjoint_count()
    );
    if undefined > 0 {
        warn!("{undefined} edges have no spatial cell; their locality is -1");
    }
    out
}
