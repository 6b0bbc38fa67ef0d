use thiserror::Error;

use ed_core::{EdError, EdgeId};

/// Structural contract violations.  Any of these aborts the run.
///
/// Data-quality gaps (unmatched restrictions, undefined cells) are not
/// errors; they are counted in the compile report instead.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{edge} has no usable {field}; speeds and lengths must be resolved upstream")]
    MissingCost { edge: EdgeId, field: &'static str },

    #[error("{edge} has non-positive speed {kmh} km/h")]
    InvalidSpeed { edge: EdgeId, kmh: f64 },

    #[error("{edge} has negative length {length_m} m")]
    InvalidLength { edge: EdgeId, length_m: f64 },

    #[error("dual edge references {edge}, but the edge table holds {edge_count} edges")]
    UnknownEdge { edge: EdgeId, edge_count: usize },

    #[error("resolution {requested} exceeds the spatial index maximum of {max}")]
    Resolution { requested: u8, max: u8 },

    #[error(transparent)]
    Config(#[from] EdError),

    #[error("thread pool: {0}")]
    ThreadPool(String),
}

pub type CompileResult<T> = Result<T, CompileError>;
