//! C2 — the `SiderealFramework` builder (§4.1).
//!
//! Each step is kept as its own small function so the soft-failure policy
//! (log and keep a zeroed field rather than abort the whole chart) applies
//! independently to SVP and obliquity, exactly as `chartmanager.py`'s
//! `_initialize_sidereal_framework` does it.

use chart_domain::{EphemerisProvider, Instant, SiderealFramework};
use tracing::warn;

use crate::AppResult;

/// Julian Day of the instant's true (UTC) moment, and of midnight on the
/// civil date — the framework builder needs both (the former for ecliptic/
/// ayanamsa/obliquity calls, the latter for the LST polynomial).
pub struct JulianDays {
    pub at_instant: f64,
    pub at_midnight: f64,
}

/// Computes both Julian Days for an [`Instant`] via the ephemeris provider.
///
/// `at_instant` is keyed off the UTC projection — ecliptic/ayanamsa/obliquity
/// lookups need the body's true moment, not its civil wall-clock reading, so
/// a civil date this far from UTC midnight would otherwise land on the wrong
/// side of a day boundary. `at_midnight` stays on the civil date: it only
/// feeds the LST polynomial, which already takes the UTC offset separately.
pub async fn julian_days(
    ephemeris: &dyn EphemerisProvider,
    instant: &Instant,
) -> AppResult<JulianDays> {
    let local = instant.local;
    let utc = instant.utc;

    let at_instant = ephemeris
        .julian_day(
            utc.year(),
            u8::from(utc.month()),
            utc.day(),
            instant.utc_hour_fraction(),
        )
        .await?;
    let at_midnight = ephemeris
        .julian_day(local.year(), u8::from(local.month()), local.day(), 0.0)
        .await?;

    Ok(JulianDays {
        at_instant,
        at_midnight,
    })
}

/// Builds the [`SiderealFramework`] for `(instant, geo_longitude, geo_latitude)`.
///
/// SVP and obliquity failures are soft (§4.1, §7): on an ephemeris error the
/// field is logged and left at the value it already held (zero), and the
/// framework is still returned — never a hard failure.
pub async fn build_framework(
    ephemeris: &dyn EphemerisProvider,
    instant: &Instant,
    jd: &JulianDays,
    geo_longitude: f64,
    geo_latitude: f64,
) -> SiderealFramework {
    let lst = chart_domain::math::local_sidereal_time(
        jd.at_midnight,
        instant.civil_hour_fraction(),
        instant.offset_hours(),
        geo_longitude,
    );

    let raw_ayanamsa = match ephemeris.ayanamsa(jd.at_instant).await {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "ayanamsa lookup failed, defaulting SVP to 30");
            0.0
        }
    };
    let svp = 30.0 - raw_ayanamsa;

    let obliquity = match ephemeris.obliquity(jd.at_instant).await {
        Ok(value) => value,
        Err(error) => {
            warn!(%error, "obliquity lookup failed, field left zeroed");
            0.0
        }
    };

    SiderealFramework::new(geo_longitude, geo_latitude, lst, svp, obliquity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixtureEphemeris;

    #[tokio::test]
    async fn hackensack_framework_matches_fixture() {
        let ephemeris = FixtureEphemeris::hackensack();
        let instant = ephemeris.hackensack_instant();
        let jd = julian_days(&ephemeris, &instant).await.expect("jd");
        let framework = build_framework(&ephemeris, &instant, &jd, -74.1169, 40.9792).await;

        assert!((framework.lst - 9.325).abs() < 0.02, "lst={}", framework.lst);
        assert!((framework.svp - 4.991).abs() < 0.02, "svp={}", framework.svp);
        assert!(
            (framework.obliquity - 23.436).abs() < 0.01,
            "obliquity={}",
            framework.obliquity
        );
        assert!((framework.ramc - framework.lst * 15.0).abs() < f64::EPSILON);
    }
}
