//! Geographic coordinate type.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  The finest hexagonal cells are
//! well under a metre across, so single precision would quantise distinct
//! junctions into the same cell.

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if both components are finite and inside the WGS-84 domain.
    ///
    /// Invalid points never get a spatial cell; their edges end up with an
    /// undefined locality instead of a bogus one.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}
