//! The `OutputWriter` trait implemented by output backends.

use ed_compile::{CompiledNetwork, DualGraph, EdgeTags, ForbiddenTurns, ShortcutEntry};
use ed_network::PrimalGraph;

use crate::IoResult;

/// Sink for the compiler's tables.
pub trait OutputWriter {
    /// Write the dual graph, one row per legal transition.
    fn write_edge_graph(&mut self, dual: &DualGraph) -> IoResult<()>;

    /// Write the shortcut table.
    fn write_shortcuts(&mut self, rows: &[ShortcutEntry]) -> IoResult<()>;

    /// Write the edge table enriched with cells, locality and cost.
    fn write_edges(&mut self, graph: &PrimalGraph, tags: &EdgeTags) -> IoResult<()>;

    /// Write the matched forbidden turns, ascending.
    fn write_forbidden(&mut self, forbidden: &ForbiddenTurns) -> IoResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> IoResult<()>;

    /// Write every table of `compiled`, then [`finish`](Self::finish).
    fn write_compiled(&mut self, graph: &PrimalGraph, compiled: &CompiledNetwork) -> IoResult<()> {
        self.write_edge_graph(&compiled.dual)?;
        self.write_shortcuts(&compiled.shortcuts)?;
        self.write_edges(graph, &compiled.tags)?;
        self.write_forbidden(&compiled.forbidden)?;
        self.finish()
    }
}
