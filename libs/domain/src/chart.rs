//! `Chart` — the fully-populated, by-value result of a chart computation.
//!
//! A `Chart` owns every sub-map outright; there is no sharing or
//! back-referencing anywhere in it, which is what makes cheap `Clone` (used
//! by the return-pair generator's deep copies) safe.

use serde::Serialize;
use time::OffsetDateTime;

use crate::angles::{Angles, Cusps};
use crate::body_map::BodyMap;
use crate::ecliptic::EclipticCoords;
use crate::framework::SiderealFramework;
use crate::julian_day::JulianDay;

/// Mundane (Campanus) position of a body: 1-based house index plus Prime
/// Vertical Longitude.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MundanePosition {
    pub house: u8,
    pub pvl: f64,
}

/// A fully-populated sidereal chart. Produced by the chart assembler and
/// thereafter immutable except through `relocate`/`precess`, which replace
/// `framework`, `mundane`, `right_ascension`, `angles` and `cusps` in place
/// while leaving `ecliptic` untouched (ecliptic longitudes are
/// place-invariant).
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub local_datetime: OffsetDateTime,
    pub utc_datetime: OffsetDateTime,
    pub tz_name: String,
    pub julian_day: JulianDay,
    pub framework: SiderealFramework,
    pub ecliptic: BodyMap<EclipticCoords>,
    pub mundane: BodyMap<MundanePosition>,
    pub right_ascension: BodyMap<f64>,
    pub cusps: Cusps,
    pub angles: Angles,
    pub place_name: Option<String>,
}

impl Chart {
    /// Ecliptic longitude of a body — the one quantity `relocate`/`precess`
    /// never touch, and the value a harmonic search probes against.
    #[inline]
    pub fn ecliptic_longitude(&self, body: crate::body::BodyId) -> f64 {
        self.ecliptic.get(body).longitude
    }
}
