//! Shortcut table assembler.
//!
//! One row per dual edge `(incoming, outgoing)`:
//!
//! | Column     | Source                                                     |
//! |------------|------------------------------------------------------------|
//! | `incoming` | the dual edge's incoming edge                              |
//! | `via_edge` | the dual edge's outgoing edge                              |
//! | `cost`     | incoming edge's travel time (s)                            |
//! | `via_cell` | incoming edge's target-side cell (the junction)            |
//! | `lca_res`  | `incoming.locality.combine(outgoing.locality)`             |
//!
//! No aggregation happens here; the table goes straight to the router.

use ed_core::EdgeId;

use crate::dual::{DualEdge, DualGraph};
use crate::locality::{EdgeTags, Locality};
use crate::spatial::CellId;
use crate::{CompileError, CompileResult};

/// One transition row of the shortcut table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShortcutEntry {
    pub incoming: EdgeId,
    pub via_edge: EdgeId,
    pub cost:     f64,
    pub via_cell: Option<CellId>,
    pub lca_res:  Locality,
}

fn check(tags: &EdgeTags, edge: EdgeId) -> CompileResult<()> {
    if tags.contains(edge) {
        Ok(())
    } else {
        Err(CompileError::UnknownEdge { edge, edge_count: tags.len() })
    }
}

/// Build the row for one dual edge.
pub fn shortcut_entry(tags: &EdgeTags, dual: DualEdge) -> CompileResult<ShortcutEntry> {
    check(tags, dual.incoming)?;
    check(tags, dual.outgoing)?;
    let a = dual.incoming.index();
    let b = dual.outgoing.index();
    Ok(ShortcutEntry {
        incoming: dual.incoming,
        via_edge: dual.outgoing,
        cost:     tags.cost[a],
        via_cell: tags.incoming_cell[a],
        lca_res:  tags.locality[a].combine(tags.locality[b]),
    })
}

/// Assemble the shortcut table, in dual-graph order.
///
/// # Errors
///
/// [`CompileError::UnknownEdge`] if a dual edge names an edge outside the
/// tag table, which means the dual graph and edge table disagree.
pub fn assemble_shortcuts(dual: &DualGraph, tags: &EdgeTags) -> CompileResult<Vec<ShortcutEntry>> {
    #[cfg(not(feature = "parallel"))]
    {
        dual.edges().iter().map(|&d| shortcut_entry(tags, d)).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        dual.edges().par_iter().map(|&d| shortcut_entry(tags, d)).collect()
    }
}
