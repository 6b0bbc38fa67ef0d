//! End-to-end pipeline: restrictions → dual graph → tags → shortcut table.

use std::time::Instant;

use log::info;

use ed_core::CompileConfig;
use ed_network::PrimalGraph;

use crate::cost::edge_costs;
use crate::dual::{DualGraph, build_dual_graph};
use crate::locality::{EdgeTags, tag_edges};
use crate::restriction::{ForbiddenTurns, RestrictionReport, TurnRestriction, match_restrictions};
use crate::shortcut::{ShortcutEntry, assemble_shortcuts};
use crate::spatial::SpatialIndex;
use crate::{CompileError, CompileResult};

// ── Outputs ───────────────────────────────────────────────────────────────────

/// Counts gathered during a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileReport {
    pub restrictions:    RestrictionReport,
    pub forbidden_pairs: usize,
    pub edges:           usize,
    pub dual_edges:      usize,
    pub undefined_cells: usize,
    pub disjoint_edges:  usize,
}

/// Everything the compiler produces.  Read-only once returned.
#[derive(Clone, Debug)]
pub struct CompiledNetwork {
    pub forbidden: ForbiddenTurns,
    pub dual:      DualGraph,
    pub tags:      EdgeTags,
    pub shortcuts: Vec<ShortcutEntry>,
    pub report:    CompileReport,
}

// ── Compiler ──────────────────────────────────────────────────────────────────

/// Runs the four stages against a shared, immutable [`PrimalGraph`].
///
/// # Example
///
/// ```rust,ignore
/// let compiled = Compiler::new(CompileConfig::default(), &H3Index)
///     .compile(&graph, &restrictions)?;
/// writer.write_compiled(&graph, &compiled)?;
/// ```
pub struct Compiler<'a, I: SpatialIndex + ?Sized> {
    config: CompileConfig,
    index:  &'a I,
}

impl<'a, I: SpatialIndex + ?Sized> Compiler<'a, I> {
    pub fn new(config: CompileConfig, index: &'a I) -> Self {
        Self { config, index }
    }

    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Compile `graph` under `restrictions`.
    ///
    /// Costs are validated first so a missing speed or length aborts before
    /// any other work.  With the `parallel` feature and `num_threads` set,
    /// every stage runs inside a dedicated Rayon pool of that size.
    pub fn compile(
        &self,
        graph:        &PrimalGraph,
        restrictions: &[TurnRestriction],
    ) -> CompileResult<CompiledNetwork> {
        self.config.validate()?;
        let max = self.index.max_resolution();
        if self.config.finest_resolution > max {
            return Err(CompileError::Resolution {
                requested: self.config.finest_resolution,
                max,
            });
        }

        #[cfg(feature = "parallel")]
        if let Some(n) = self.config.num_threads {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| CompileError::ThreadPool(e.to_string()))?;
            return pool.install(|| self.run(graph, restrictions));
        }

        self.run(graph, restrictions)
    }

    fn run(
        &self,
        graph:        &PrimalGraph,
        restrictions: &[TurnRestriction],
    ) -> CompileResult<CompiledNetwork> {
        let t0 = Instant::now();
        info!(
            "compiling {} nodes, {} edges, {} restrictions",
            graph.node_count(),
            graph.edge_count(),
            restrictions.len()
        );

        let costs = edge_costs(graph)?;
        let (forbidden, restriction_report) =
            match_restrictions(graph, restrictions, self.config.ambiguity);
        let dual = build_dual_graph(graph, &forbidden);
        let tags = tag_edges(graph, self.index, self.config.finest_resolution, costs);
        let shortcuts = assemble_shortcuts(&dual, &tags)?;

        let report = CompileReport {
            restrictions:    restriction_report,
            forbidden_pairs: forbidden.len(),
            edges:           graph.edge_count(),
            dual_edges:      dual.len(),
            undefined_cells: tags.undefined_count(),
            disjoint_edges:  tags.disjoint_count(),
        };
        info!(
            "compiled {} shortcut rows in {:.3} s",
            shortcuts.len(),
            t0.elapsed().as_secs_f64()
        );

        Ok(CompiledNetwork { forbidden, dual, tags, shortcuts, report })
    }
}
