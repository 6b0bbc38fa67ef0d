//! Per-edge travel cost.

use ed_core::EdgeId;
use ed_network::PrimalGraph;

use crate::{CompileError, CompileResult};

/// Travel time in seconds for `length_m` metres at `maxspeed_kmh`.
#[inline]
pub fn travel_time_secs(length_m: f64, maxspeed_kmh: f64) -> f64 {
    length_m / (maxspeed_kmh * 1000.0 / 3600.0)
}

/// Cost of one edge, rejecting anything that would produce zero, NaN, or
/// infinity instead of a real travel time.
pub fn edge_cost(graph: &PrimalGraph, edge: EdgeId) -> CompileResult<f64> {
    let length_m = graph.edge_length_m[edge.index()]
        .filter(|l| l.is_finite())
        .ok_or(CompileError::MissingCost { edge, field: "length" })?;
    let kmh = graph.edge_maxspeed_kmh[edge.index()]
        .filter(|s| s.is_finite())
        .ok_or(CompileError::MissingCost { edge, field: "maxspeed" })?;

    if length_m < 0.0 {
        return Err(CompileError::InvalidLength { edge, length_m });
    }
    if kmh <= 0.0 {
        return Err(CompileError::InvalidSpeed { edge, kmh });
    }
    Ok(travel_time_secs(length_m, kmh))
}

/// Costs of every edge, indexed by `EdgeId`.  Fails on the first bad edge.
pub fn edge_costs(graph: &PrimalGraph) -> CompileResult<Vec<f64>> {
    graph.edges().map(|e| edge_cost(graph, e)).collect()
}
