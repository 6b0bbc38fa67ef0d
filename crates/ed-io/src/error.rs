//! Error types for ed-io.

use thiserror::Error;

use ed_network::NetworkError;

/// Errors raised while reading input tables or writing output tables.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A field could not be interpreted (bad way-id list, bad number).
    #[error("parse error: {0}")]
    Parse(String),

    /// The rows parsed but do not form a valid graph.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

/// Alias for `Result<T, IoError>`.
pub type IoResult<T> = Result<T, IoError>;
