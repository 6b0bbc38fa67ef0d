//! Compiler configuration.

use std::fmt;
use std::str::FromStr;

use crate::{EdError, EdResult};

// ── AmbiguityPolicy ───────────────────────────────────────────────────────────

/// What the restriction matcher does when more than one incident edge carries
/// the restriction's from-way (or to-way).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AmbiguityPolicy {
    /// Pick the candidate with the lowest `EdgeId`.
    #[default]
    LowestEdgeId,
    /// Treat the restriction as unmatched.
    Reject,
}

impl FromStr for AmbiguityPolicy {
    type Err = EdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "lowest-edge-id" | "lowest" => Ok(Self::LowestEdgeId),
            "reject" => Ok(Self::Reject),
            other => Err(EdError::Config(format!(
                "unknown ambiguity policy {other:?}: expected \"lowest-edge-id\" or \"reject\""
            ))),
        }
    }
}

impl fmt::Display for AmbiguityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LowestEdgeId => "lowest-edge-id",
            Self::Reject => "reject",
        })
    }
}

// ── CompileConfig ─────────────────────────────────────────────────────────────

/// Top-level compiler configuration.
///
/// Built by the application crate (CLI flags, or a config file with the
/// `serde` feature) and passed by reference to the pipeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompileConfig {
    /// Finest spatial-index resolution used for edge endpoint cells.
    /// Default: 15, the deepest H3 level.
    pub finest_resolution: u8,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Tie-break for restrictions whose way id matches several edges.
    pub ambiguity: AmbiguityPolicy,
}

impl CompileConfig {
    /// Deepest resolution of the H3 hierarchy.
    pub const DEFAULT_FINEST_RESOLUTION: u8 = 15;

    /// Reject settings that no spatial index could honour.  The upper bound
    /// on `finest_resolution` depends on the index and is checked by the
    /// compiler.
    pub fn validate(&self) -> EdResult<()> {
        if self.num_threads == Some(0) {
            return Err(EdError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            finest_resolution: Self::DEFAULT_FINEST_RESOLUTION,
            num_threads:       None,
            ambiguity:         AmbiguityPolicy::default(),
        }
    }
}
