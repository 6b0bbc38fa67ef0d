//! `ed-compile`: the edge-dual graph compiler.
//!
//! # Pipeline
//!
//! ```text
//! PrimalGraph + TurnRestrictions
//!   ① Costs        length ÷ (speed × 1000/3600) per edge; missing input aborts.
//!   ② Restrictions relation (from-way, via-node, to-way) → forbidden edge pair.
//!   ③ Dual graph   per node, in_edges × out_edges minus U-turns and forbidden pairs.
//!   ④ Tags         endpoint cells + locality (LCA level) per edge.
//!   ⑤ Shortcuts    one row per dual edge: cost, via cell, combined locality.
//! ```
//!
//! ③ and ④ are independent of each other; both only read the graph.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs ②–⑤ on Rayon's thread pool.                          |
//! | `fx-hash`  | FxHash for the forbidden-pair set and node lookup.        |
//! | `h3`       | Enables `H3Index` (via `h3o`).                            |
//!
//! Output is identical with or without `parallel`.

pub mod compiler;
pub mod cost;
pub mod dual;
pub mod error;
pub mod locality;
pub mod restriction;
pub mod shortcut;
pub mod spatial;


pub use compiler::{CompileReport, CompiledNetwork, Compiler};
pub use cost::{edge_cost, edge_costs, travel_time_secs};
pub use dual::{DualEdge, DualGraph, build_dual_graph};
pub use error::{CompileError, CompileResult};
pub use locality::{EdgeTags, Locality, lca_resolution, tag_edges};
pub use restriction::{
    DropReason, ForbiddenTurns, MatchOutcome, RestrictionReport, TurnRestriction,
    match_restriction, match_restrictions,
};
pub use shortcut::{ShortcutEntry, assemble_shortcuts, shortcut_entry};
pub use spatial::{CellId, GridIndex, SpatialIndex};

#[cfg(feature = "h3")]
pub use spatial::H3Index;
