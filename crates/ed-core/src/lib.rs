//! `ed-core`: foundational types for the `edgedual` graph compiler.
//!
//! This crate is a dependency of every other `ed-*` crate.  It has no `ed-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId` (arena indices); `OsmNodeId`, `WayId`, `RelationId` (external) |
//! | [`geo`]      | `GeoPoint`, coordinate validity                          |
//! | [`config`]   | `CompileConfig`, `AmbiguityPolicy`                       |
//! | [`error`]    | `EdError`, `EdResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AmbiguityPolicy, CompileConfig};
pub use error::{EdError, EdResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId, OsmNodeId, RelationId, WayId};
