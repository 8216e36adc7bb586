//! `SiderealFramework` — the immutable per-moment/per-place coordinate basis
//! every projection in a chart is computed against.

use serde::{Deserialize, Serialize};

/// Geographic longitude, latitude, Local Sidereal Time, RAMC, SVP and
/// obliquity for a single instant and place. Produced by the framework
/// builder (§4.1) and never mutated in place — `relocate`/`precess` replace
/// it wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealFramework {
    /// Geographic longitude in `[-180, 180]`, east-positive.
    pub geo_longitude: f64,
    /// Geographic latitude in `[-90, 90]`, north-positive.
    pub geo_latitude: f64,
    /// Local Sidereal Time in hours, `[0, 24)`.
    pub lst: f64,
    /// Right Ascension of the Medium Coeli, degrees: `lst * 15`.
    pub ramc: f64,
    /// Synetic Vernal Point, degrees, `[0, 30)`: `30 - ayanamsa`.
    pub svp: f64,
    /// Obliquity of the ecliptic, degrees, roughly `[22, 25)`.
    pub obliquity: f64,
}

impl SiderealFramework {
    /// Constructs a framework from its already-derived components, enforcing
    /// the `RAMC = LST * 15` invariant by construction rather than trusting
    /// a caller-supplied RAMC.
    pub fn new(geo_longitude: f64, geo_latitude: f64, lst: f64, svp: f64, obliquity: f64) -> Self {
        Self {
            geo_longitude,
            geo_latitude,
            lst,
            ramc: lst * 15.0,
            svp,
            obliquity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramc_is_exactly_lst_times_fifteen() {
        let framework = SiderealFramework::new(-74.1169, 40.9792, 9.325, 4.991, 23.436);
        assert!((framework.ramc - framework.lst * 15.0).abs() < f64::EPSILON);
    }
}
