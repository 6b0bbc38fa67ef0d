//! Speed resolution at the input boundary.
//!
//! Raw OSM `maxspeed` strings become km/h here, before the graph is built.
//! The compiler never sees a string or a missing speed that could have been
//! defaulted.
//!
//! | Raw value          | Result                                   |
//! |--------------------|------------------------------------------|
//! | `"50"`             | 50 km/h                                  |
//! | `"50 km/h"`        | 50 km/h (`kmh` and `kph` also accepted)  |
//! | `"30 mph"`         | 30 × 1.60934 km/h                        |
//! | `"50;30"`          | 50 km/h (first number wins)              |
//! | `""`, `"none"`     | [`SpeedTable`] default for the highway   |

use std::collections::HashMap;

/// Kilometres per statute mile.
pub const MPH_TO_KMH: f64 = 1.60934;

/// Default speed for highway classes not in the table.
pub const FALLBACK_KMH: f64 = 50.0;

const DEFAULTS: &[(&str, f64)] = &[
    ("motorway",       110.0),
    ("motorway_link",  110.0),
    ("trunk",           90.0),
    ("trunk_link",      90.0),
    ("primary",         70.0),
    ("primary_link",    70.0),
    ("secondary",       60.0),
    ("secondary_link",  60.0),
    ("tertiary",        50.0),
    ("tertiary_link",   50.0),
    ("residential",     30.0),
    ("living_street",   30.0),
    ("service",         20.0),
    ("unclassified",    40.0),
    ("road",            40.0),
];

// ── SpeedTable ────────────────────────────────────────────────────────────────

/// Immutable `highway → km/h` defaults.  Build once, pass by reference.
#[derive(Clone, Debug)]
pub struct SpeedTable {
    by_highway: HashMap<String, f64>,
    fallback:   f64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            by_highway: DEFAULTS.iter().map(|&(k, v)| (k.to_owned(), v)).collect(),
            fallback:   FALLBACK_KMH,
        }
    }
}

impl SpeedTable {
    /// Default speed for `highway`.  A `;`-separated list uses its first
    /// entry; unknown or empty classes get the fallback.
    pub fn default_for(&self, highway: &str) -> f64 {
        let class = highway.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        self.by_highway.get(&class).copied().unwrap_or(self.fallback)
    }

    /// Resolve a raw `maxspeed` to km/h, defaulting by `highway` when the tag
    /// is absent or carries no number.
    pub fn resolve(&self, maxspeed: Option<&str>, highway: Option<&str>) -> Speed {
        match maxspeed.and_then(parse_maxspeed) {
            Some(kmh) => Speed::Tagged(kmh),
            None      => Speed::Default(self.default_for(highway.unwrap_or(""))),
        }
    }
}

/// A resolved speed in km/h and where it came from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Speed {
    /// Parsed from the `maxspeed` tag.
    Tagged(f64),
    /// Taken from the highway-class table.
    Default(f64),
}

impl Speed {
    #[inline]
    pub fn kmh(self) -> f64 {
        match self {
            Speed::Tagged(v) | Speed::Default(v) => v,
        }
    }

    #[inline]
    pub fn is_default(self) -> bool {
        matches!(self, Speed::Default(_))
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// First number in `raw` with its optional unit, in km/h.
///
/// Returns `None` when `raw` contains no digits.
pub fn parse_maxspeed(raw: &str) -> Option<f64> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let rest = &raw[start..];

    let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let mut len = int_len;
    if rest[int_len..].starts_with('.') {
        let frac = &rest[int_len + 1..];
        len += 1 + frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
    }
    let value: f64 = rest[..len].trim_end_matches('.').parse().ok()?;

    let unit = rest[len..].trim_start().to_ascii_lowercase();
    if unit.starts_with("mph") {
        Some(value * MPH_TO_KMH)
    } else {
        Some(value)
    }
}
