//! Strongly typed, zero-cost identifier wrappers.
//!
//! Two families live here:
//!
//! - **Arena indices** (`NodeId`, `EdgeId`): dense `u32` positions into the
//!   primal graph's `Vec`s.  The inner integer is `pub` so hot loops can index
//!   directly, but callers should prefer `.index()`.
//! - **External ids** (`OsmNodeId`, `WayId`, `RelationId`): opaque `i64`
//!   identifiers carried over from the source map data.  They are never used
//!   as indices.

use std::fmt;

/// Generate a typed arena index around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

/// Generate an opaque external identifier.  No sentinel, no indexing.
macro_rules! external_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> Self {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// Index of a primal-graph node.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed primal-graph edge.
    ///
    /// This is also the edge's public integer id: it equals the edge's
    /// position in upstream input order and is what every output table
    /// refers to.
    pub struct EdgeId(u32);
}

external_id! {
    /// Source-data identifier of a node (the restriction via-node refers to it).
    pub struct OsmNodeId(i64);
}

external_id! {
    /// Source-data identifier of an original way.  One edge may carry several.
    pub struct WayId(i64);
}

external_id! {
    /// Source-data identifier of a turn-restriction relation.
    pub struct RelationId(i64);
}
