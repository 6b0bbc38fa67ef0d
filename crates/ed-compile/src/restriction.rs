//! Restriction matcher: turn-restriction relations → forbidden edge pairs.
//!
//! A relation names a from-way, a via-node, and a to-way.  It becomes a
//! concrete forbidden turn `(incoming, outgoing)` when
//!
//! - the via-node exists in the graph,
//! - exactly one (see [`AmbiguityPolicy`]) edge *entering* the via-node
//!   carries the from-way in its way-id set, and
//! - exactly one edge *leaving* the via-node carries the to-way.
//!
//! Set membership matters: a merged edge with ways `{20, 21}` matches a
//! restriction on way 21.
//!
//! Anything else drops the restriction.  Drops are expected with real map
//! data; they are counted in [`RestrictionReport`] and logged, never raised.
//! Every restriction kind is treated as "forbid this exact pair".

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashSet as PairSet;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashSet as PairSet;

use log::{debug, info, warn};

use ed_core::{AmbiguityPolicy, EdgeId, OsmNodeId, RelationId, WayId};
use ed_network::PrimalGraph;

// ── TurnRestriction ───────────────────────────────────────────────────────────

/// A raw restriction relation as delivered by the input boundary.
///
/// Conditional and time-of-day restrictions must already be filtered out;
/// the matcher does not look at `kind`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRestriction {
    pub relation: RelationId,
    pub kind:     String,
    pub from_way: Option<WayId>,
    pub via_node: Option<OsmNodeId>,
    pub to_way:   Option<WayId>,
}

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Why a restriction produced no forbidden turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// `from`, `via`, or `to` member absent from the relation.
    MissingMember,
    /// Via-node not in the graph (outside the extract, or simplified away).
    ViaNodeNotFound,
    /// No incoming edge at the via-node carries the from-way.
    FromWayUnmatched,
    /// No outgoing edge at the via-node carries the to-way.
    ToWayUnmatched,
    /// Several edges carry the way and the policy is `Reject`.
    Ambiguous,
}

/// Result of matching one restriction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched {
        incoming:   EdgeId,
        outgoing:   EdgeId,
        /// `true` if a lowest-edge-id tie-break picked one of the sides.
        tie_broken: bool,
    },
    Dropped(DropReason),
}

/// Counts reported back to the caller after matching.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestrictionReport {
    pub total:              usize,
    pub matched:            usize,
    pub tie_broken:         usize,
    pub missing_member:     usize,
    pub via_node_not_found: usize,
    pub from_way_unmatched: usize,
    pub to_way_unmatched:   usize,
    pub ambiguous:          usize,
}

impl RestrictionReport {
    pub fn dropped(&self) -> usize {
        self.total - self.matched
    }

    fn record(&mut self, outcome: &MatchOutcome) {
        self.total += 1;
        match outcome {
            MatchOutcome::Matched { tie_broken, .. } => {
                self.matched += 1;
                if *tie_broken {
                    self.tie_broken += 1;
                }
            }
            MatchOutcome::Dropped(reason) => match reason {
                DropReason::MissingMember    => self.missing_member += 1,
                DropReason::ViaNodeNotFound  => self.via_node_not_found += 1,
                DropReason::FromWayUnmatched => self.from_way_unmatched += 1,
                DropReason::ToWayUnmatched   => self.to_way_unmatched += 1,
                DropReason::Ambiguous        => self.ambiguous += 1,
            },
        }
    }
}

// ── ForbiddenTurns ────────────────────────────────────────────────────────────

/// Deduplicated set of forbidden `(incoming, outgoing)` edge pairs.
#[derive(Clone, Debug, Default)]
pub struct ForbiddenTurns {
    pairs: PairSet<(EdgeId, EdgeId)>,
}

impl ForbiddenTurns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the pair was already present.
    pub fn insert(&mut self, incoming: EdgeId, outgoing: EdgeId) -> bool {
        self.pairs.insert((incoming, outgoing))
    }

    #[inline]
    pub fn contains(&self, incoming: EdgeId, outgoing: EdgeId) -> bool {
        self.pairs.contains(&(incoming, outgoing))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All pairs, ascending by `(incoming, outgoing)`.
    pub fn sorted(&self) -> Vec<(EdgeId, EdgeId)> {
        let mut v: Vec<_> = self.pairs.iter().copied().collect();
        v.sort_unstable();
        v
    }
}

impl FromIterator<(EdgeId, EdgeId)> for ForbiddenTurns {
    fn from_iter<T: IntoIterator<Item = (EdgeId, EdgeId)>>(iter: T) -> Self {
        Self { pairs: iter.into_iter().collect() }
    }
}

// ── Matching ──────────────────────────────────────────────────────────────────

enum Pick {
    One(EdgeId, bool),
    None,
    Ambiguous,
}

/// Select the candidate carrying `way`.  `candidates` is ascending by id, so
/// the first hit is the lowest edge id.
fn pick(graph: &PrimalGraph, candidates: &[EdgeId], way: WayId, policy: AmbiguityPolicy) -> Pick {
    let mut hits = candidates.iter().copied().filter(|&e| graph.has_way(e, way));
    let Some(first) = hits.next() else {
        return Pick::None;
    };
    match (hits.next().is_some(), policy) {
        (false, _)                            => Pick::One(first, false),
        (true, AmbiguityPolicy::LowestEdgeId) => Pick::One(first, true),
        (true, AmbiguityPolicy::Reject)       => Pick::Ambiguous,
    }
}

/// Match a single restriction against the graph.
pub fn match_restriction(
    graph:       &PrimalGraph,
    restriction: &TurnRestriction,
    policy:      AmbiguityPolicy,
) -> MatchOutcome {
    let (Some(from_way), Some(via), Some(to_way)) =
        (restriction.from_way, restriction.via_node, restriction.to_way)
    else {
        return MatchOutcome::Dropped(DropReason::MissingMember);
    };
    let Some(via) = graph.node_index(via) else {
        return MatchOutcome::Dropped(DropReason::ViaNodeNotFound);
    };

    let (incoming, tie_in) = match pick(graph, graph.in_edges(via), from_way, policy) {
        Pick::One(e, tie) => (e, tie),
        Pick::None        => return MatchOutcome::Dropped(DropReason::FromWayUnmatched),
        Pick::Ambiguous   => return MatchOutcome::Dropped(DropReason::Ambiguous),
    };
    let (outgoing, tie_out) = match pick(graph, graph.out_edges(via), to_way, policy) {
        Pick::One(e, tie) => (e, tie),
        Pick::None        => return MatchOutcome::Dropped(DropReason::ToWayUnmatched),
        Pick::Ambiguous   => return MatchOutcome::Dropped(DropReason::Ambiguous),
    };

    MatchOutcome::Matched { incoming, outgoing, tie_broken: tie_in || tie_out }
}

/// Match every restriction and collect the forbidden-turn set.
///
/// With the `parallel` feature each restriction is matched on Rayon's pool;
/// outcomes are folded in input order either way, so the report and log
/// output do not depend on scheduling.
pub fn match_restrictions(
    graph:        &PrimalGraph,
    restrictions: &[TurnRestriction],
    policy:       AmbiguityPolicy,
) -> (ForbiddenTurns, RestrictionReport) {
    #[cfg(not(feature = "parallel"))]
    let outcomes: Vec<MatchOutcome> = restrictions
        .iter()
        .map(|r| match_restriction(graph, r, policy))
        .collect();

    #[cfg(feature = "parallel")]
    let outcomes: Vec<MatchOutcome> = {
        use rayon::prelude::*;
        restrictions
            .par_iter()
            .map(|r| match_restriction(graph, r, policy))
            .collect()
    };

    let mut forbidden = ForbiddenTurns::new();
    let mut report    = RestrictionReport::default();

    for (r, outcome) in restrictions.iter().zip(&outcomes) {
        report.record(outcome);
        match *outcome {
            MatchOutcome::Matched { incoming, outgoing, .. } => {
                forbidden.insert(incoming, outgoing);
            }
            MatchOutcome::Dropped(reason) => {
                debug!("dropped restriction {} ({}): {reason:?}", r.relation, r.kind);
            }
        }
    }

    info!(
        "restrictions: {} total, {} matched, {} forbidden pairs",
        report.total,
        report.matched,
        forbidden.len()
    );
    if report.dropped() > 0 {
        warn!(
            "dropped {} restrictions (missing member {}, via node {}, from way {}, to way {}, ambiguous {})",
            report.dropped(),
            report.missing_member,
            report.via_node_not_found,
            report.from_way_unmatched,
            report.to_way_unmatched,
            report.ambiguous
        );
    }

    (forbidden, report)
}
