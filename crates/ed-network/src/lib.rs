//! `ed-network`: the primal road graph consumed by the compiler.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`network`] | `PrimalGraph` (edge arena + in/out CSR), `PrimalGraphBuilder`, `EdgeAttrs` |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the `OsmNodeId → NodeId` lookup.                |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `ed-core` types.      |

pub mod error;
pub mod network;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use network::{EdgeAttrs, PrimalGraph, PrimalGraphBuilder};
