//! Test-only `EphemerisProvider` double used by the orchestration layer's
//! own unit tests. Not part of the public API: gated behind `#[cfg(test)]`
//! in `lib.rs`.
//!
//! Mirrors a single fixed sighting — 2019-03-18 22:30:15 America/New_York
//! (-04:00), Hackensack NJ (-74.1169, 40.9792) — against which
//! `chart_domain::math`'s own unit tests are independently checked, so the
//! two suites agree on what "correct" looks like for this instant.

use async_trait::async_trait;
use chart_domain::{BodyId, EphemerisProvider, HousesOutput, Instant, PortResult, RawEclipticOutput};
use time::macros::datetime;

/// Converts a proleptic Gregorian civil date plus hour fraction into a
/// Julian Day, the same polynomial `chart_domain::math`'s LST fixture keys
/// its `jd_midnight` constant against. Treats `hour_fraction` as already
/// being in whatever frame the caller means it to be (local or UT); this
/// fixture never needs to disambiguate the two itself.
fn civil_to_julian_day(year: i32, month: u8, day: u8, hour_fraction: f64) -> f64 {
    let y = f64::from(year);
    let m = f64::from(month);
    let d = f64::from(day);
    let a = ((m + 9.0) / 12.0).floor();
    367.0 * y - (7.0 * (y + a) / 4.0).floor() + (275.0 * m / 9.0).floor() + d + 1_721_013.5
        + hour_fraction / 24.0
}

/// A fixed-response ephemeris double: every method returns a constant
/// tuned to the Hackensack fixture, independent of the `jd`/`body`
/// arguments it is called with.
pub struct FixtureEphemeris;

impl FixtureEphemeris {
    pub fn hackensack() -> Self {
        Self
    }

    /// The civil instant the fixture is tuned around: 2019-03-18 22:30:15
    /// America/New_York (-04:00 EDT).
    pub fn hackensack_instant(&self) -> Instant {
        let local = datetime!(2019-03-18 22:30:15 -4);
        let utc = datetime!(2019-03-19 02:30:15 UTC);
        Instant::new(local, utc)
    }
}

#[async_trait]
impl EphemerisProvider for FixtureEphemeris {
    async fn julian_day(&self, year: i32, month: u8, day: u8, hour_fraction: f64) -> PortResult<f64> {
        Ok(civil_to_julian_day(year, month, day, hour_fraction))
    }

    async fn calc_body(&self, _jd: f64, body: BodyId) -> PortResult<RawEclipticOutput> {
        let longitude = match body {
            BodyId::Sun => 333.196,
            BodyId::Moon => 125.5073,
            _ => 0.0,
        };
        Ok(RawEclipticOutput {
            longitude,
            ..RawEclipticOutput::default()
        })
    }

    async fn obliquity(&self, _jd: f64) -> PortResult<f64> {
        Ok(23.436)
    }

    async fn ayanamsa(&self, _jd: f64) -> PortResult<f64> {
        Ok(25.009)
    }

    async fn houses(&self, _jd: f64, _ramc: f64, _geo_latitude: f64) -> PortResult<HousesOutput> {
        Ok(HousesOutput {
            asc: 194.254,
            mc: 112.426,
            eq_asc: 0.0,
            cusps: [
                14.254, 43.0, 73.0, 292.426, 131.0, 163.0, 194.254, 223.0, 253.0, 112.426, 311.0,
                343.0,
            ],
        })
    }
}
