//! Graph-construction error type.

use thiserror::Error;

use ed_core::OsmNodeId;

/// Errors produced by `ed-network`.
///
/// All of these are upstream contract breaches: the compiler expects a
/// simplified, self-loop-free graph whose edges only reference known nodes.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("external node {0} referenced by an edge was never added")]
    UnknownNode(OsmNodeId),

    #[error("external node {0} added twice")]
    DuplicateNode(OsmNodeId),

    #[error("self-loop at {0}: upstream simplification must remove these")]
    SelfLoop(OsmNodeId),

    #[error("graph exceeds {max} {what}")]
    Capacity { what: &'static str, max: u32 },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
