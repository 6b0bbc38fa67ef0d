//! Base error type.
//!
//! Sub-crates define their own error enums and wrap `EdError` as one variant
//! where they need to surface configuration problems.

use thiserror::Error;

/// The common base error for all `ed-*` crates.
#[derive(Debug, Error)]
pub enum EdError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ed-core`.
pub type EdResult<T> = Result<T, EdError>;
