//! Hierarchical spatial-index seam.
//!
//! The compiler never does cell math itself.  It asks a [`SpatialIndex`] for
//! the cell containing a point, a cell's ancestor at a coarser level, and a
//! cell's own level.  Two implementations are provided:
//!
//! | Type        | Hierarchy                                 | Max level |
//! |-------------|-------------------------------------------|-----------|
//! | `H3Index`   | H3 hexagons via `h3o` (feature `h3`)      | 15        |
//! | [`GridIndex`] | lat/lon quad grid, 2^r × 2^r cells at r | 28        |

use std::fmt;

use ed_core::GeoPoint;

// ── CellId ────────────────────────────────────────────────────────────────────

/// Opaque 64-bit cell identifier.  Zero is never a valid cell in either
/// provided index, so writers may use it for "no cell".
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

// ── SpatialIndex trait ────────────────────────────────────────────────────────

/// A hierarchical cell index.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so edges can be tagged from Rayon
/// worker threads.
pub trait SpatialIndex: Send + Sync {
    /// Cell containing `pos` at `resolution`, or `None` if either is invalid.
    fn cell_of(&self, pos: GeoPoint, resolution: u8) -> Option<CellId>;

    /// Ancestor of `cell` at `resolution`.  Returns `cell` itself at its own
    /// level and `None` for finer levels or invalid cells.
    fn parent_of(&self, cell: CellId, resolution: u8) -> Option<CellId>;

    /// Level of `cell`, or `None` if it is not a cell of this index.
    fn resolution_of(&self, cell: CellId) -> Option<u8>;

    /// Finest level this index supports.
    fn max_resolution(&self) -> u8;
}

// ── GridIndex ─────────────────────────────────────────────────────────────────

/// Square lat/lon quad grid.
///
/// Level `r` splits latitude `[-90, 90]` and longitude `[-180, 180]` into
/// `2^r` bands each; the parent of `(row, col)` one level up is
/// `(row >> 1, col >> 1)`.  Level 0 is a single world cell, so two valid
/// cells always share an ancestor.
///
/// Bit layout: `1 | 0 | level:6 | row:28 | col:28` (most to least
/// significant).  The top tag bit keeps every id non-zero.
#[derive(Copy, Clone, Debug, Default)]
pub struct GridIndex;

impl GridIndex {
    pub const MAX_RESOLUTION: u8 = 28;

    const TAG:         u64 = 1 << 63;
    const LEVEL_SHIFT: u32 = 56;
    const ROW_SHIFT:   u32 = 28;
    const AXIS_MASK:   u64 = (1 << 28) - 1;

    fn encode(level: u8, row: u64, col: u64) -> CellId {
        CellId(Self::TAG | (level as u64) << Self::LEVEL_SHIFT | row << Self::ROW_SHIFT | col)
    }

    fn decode(cell: CellId) -> Option<(u8, u64, u64)> {
        if cell.0 & Self::TAG == 0 {
            return None;
        }
        let level = ((cell.0 >> Self::LEVEL_SHIFT) & 0x3f) as u8;
        if level > Self::MAX_RESOLUTION {
            return None;
        }
        let row = (cell.0 >> Self::ROW_SHIFT) & Self::AXIS_MASK;
        let col = cell.0 & Self::AXIS_MASK;
        Some((level, row, col))
    }

    /// Band index of `frac ∈ [0, 1]` among `2^level` bands.
    fn band(frac: f64, level: u8) -> u64 {
        let bands = 1u64 << level;
        ((frac * bands as f64) as u64).min(bands - 1)
    }
}

impl SpatialIndex for GridIndex {
    fn cell_of(&self, pos: GeoPoint, resolution: u8) -> Option<CellId> {
        if !pos.is_valid() || resolution > Self::MAX_RESOLUTION {
            return None;
        }
        let row = Self::band((pos.lat + 90.0) / 180.0, resolution);
        let col = Self::band((pos.lon + 180.0) / 360.0, resolution);
        Some(Self::encode(resolution, row, col))
    }

    fn parent_of(&self, cell: CellId, resolution: u8) -> Option<CellId> {
        let (level, row, col) = Self::decode(cell)?;
        if resolution > level {
            return None;
        }
        let shift = level - resolution;
        Some(Self::encode(resolution, row >> shift, col >> shift))
    }

    fn resolution_of(&self, cell: CellId) -> Option<u8> {
        Self::decode(cell).map(|(level, _, _)| level)
    }

    fn max_resolution(&self) -> u8 {
        Self::MAX_RESOLUTION
    }
}

// ── H3Index ───────────────────────────────────────────────────────────────────

/// H3 hexagonal index backed by `h3o`.
#[cfg(feature = "h3")]
#[derive(Copy, Clone, Debug, Default)]
pub struct H3Index;

#[cfg(feature = "h3")]
impl SpatialIndex for H3Index {
    fn cell_of(&self, pos: GeoPoint, resolution: u8) -> Option<CellId> {
        let resolution = h3o::Resolution::try_from(resolution).ok()?;
        let ll = h3o::LatLng::new(pos.lat, pos.lon).ok()?;
        Some(CellId(u64::from(ll.to_cell(resolution))))
    }

    fn parent_of(&self, cell: CellId, resolution: u8) -> Option<CellId> {
        let cell = h3o::CellIndex::try_from(cell.0).ok()?;
        let resolution = h3o::Resolution::try_from(resolution).ok()?;
        cell.parent(resolution).map(|p| CellId(u64::from(p)))
    }

    fn resolution_of(&self, cell: CellId) -> Option<u8> {
        h3o::CellIndex::try_from(cell.0)
            .ok()
            .map(|c| u8::from(c.resolution()))
    }

    fn max_resolution(&self) -> u8 {
        15
    }
}
