//! C5 — the `ChartTransformer` (§4.4): `relocate` and `precess`, which
//! rebuild the place-dependent parts of a chart (framework, mundane, right
//! ascension, angles, cusps) without recomputing ecliptic positions.

use chart_domain::{Chart, EphemerisProvider, Instant, SiderealFramework};
use time::UtcOffset;

use crate::{framework, projector, AppResult};

/// Rebuilds `chart`'s framework against a new place and UTC offset, holding
/// the underlying instant fixed. Ecliptic coordinates are untouched; only
/// `framework`, `mundane`, `right_ascension`, `angles` and `cusps` are
/// replaced (§4.4).
///
/// `new_offset` is the civil UTC offset at `chart.utc_datetime` for the new
/// timezone — resolving an IANA name to an offset at a specific instant is
/// an infrastructure concern (DST rules), so the caller supplies it already
/// resolved.
pub async fn relocate(
    ephemeris: &dyn EphemerisProvider,
    chart: &Chart,
    new_tz_name: String,
    new_offset: UtcOffset,
    new_longitude: f64,
    new_latitude: f64,
) -> AppResult<Chart> {
    let new_local = chart.utc_datetime.to_offset(new_offset);
    let instant = Instant::new(new_local, chart.utc_datetime);

    let jd = framework::julian_days(ephemeris, &instant).await?;
    let sidereal_framework =
        framework::build_framework(ephemeris, &instant, &jd, new_longitude, new_latitude).await;

    let mundane = projector::project_mundane(&chart.ecliptic, &sidereal_framework);
    let right_ascension = projector::project_right_ascension(&chart.ecliptic, &sidereal_framework);
    let (angles, cusps) = projector::project_angles_and_cusps(
        ephemeris,
        chart.julian_day.as_f64(),
        sidereal_framework.ramc,
        new_latitude,
    )
    .await;

    Ok(Chart {
        local_datetime: new_local,
        utc_datetime: chart.utc_datetime,
        tz_name: new_tz_name,
        julian_day: chart.julian_day,
        framework: sidereal_framework,
        ecliptic: chart.ecliptic,
        mundane,
        right_ascension,
        cusps,
        angles,
        place_name: chart.place_name.clone(),
    })
}

/// Projects a fixed `radix` into the sky of a `transit` moment: the
/// radix's framework is wholesale replaced by the transit's (§4.4
/// `precess`), its civil datetime is re-expressed in the transit's
/// timezone, and mundane/right-ascension are recomputed from the radix's
/// own (unchanged) ecliptic positions against the transit framework.
///
/// Angles and cusps depend only on the framework (RAMC, obliquity, SVP,
/// geographic place) — never on a body's longitude — so once the radix
/// shares the transit's framework its angles/cusps are, by construction,
/// identical to the transit's own. They are copied rather than
/// re-derived through another `houses` call.
pub fn precess(radix: &Chart, transit: &Chart) -> Chart {
    let new_local = radix.utc_datetime.to_offset(transit.local_datetime.offset());

    let mundane = projector::project_mundane(&radix.ecliptic, &transit.framework);
    let right_ascension = projector::project_right_ascension(&radix.ecliptic, &transit.framework);

    Chart {
        local_datetime: new_local,
        utc_datetime: radix.utc_datetime,
        tz_name: transit.tz_name.clone(),
        julian_day: radix.julian_day,
        framework: transit.framework,
        ecliptic: radix.ecliptic,
        mundane,
        right_ascension,
        cusps: transit.cusps,
        angles: transit.angles,
        place_name: radix.place_name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::create_chart;
    use crate::test_support::FixtureEphemeris;

    #[tokio::test]
    async fn precess_shares_lst_with_transit() {
        let ephemeris = FixtureEphemeris::hackensack();
        let instant = ephemeris.hackensack_instant();
        let radix = create_chart(
            &ephemeris,
            instant,
            "America/New_York".to_string(),
            -74.1169,
            40.9792,
            None,
        )
        .await
        .expect("radix");

        // Precessing against itself is a no-op on the LST invariant.
        let precessed = precess(&radix, &radix);
        assert!((precessed.framework.lst - radix.framework.lst).abs() < f64::EPSILON);
        assert_eq!(precessed.ecliptic_longitude(chart_domain::BodyId::Sun), radix.ecliptic_longitude(chart_domain::BodyId::Sun));
    }

    #[tokio::test]
    async fn relocate_preserves_ecliptic() {
        let ephemeris = FixtureEphemeris::hackensack();
        let instant = ephemeris.hackensack_instant();
        let radix = create_chart(
            &ephemeris,
            instant,
            "America/New_York".to_string(),
            -74.1169,
            40.9792,
            None,
        )
        .await
        .expect("radix");

        let relocated = relocate(
            &ephemeris,
            &radix,
            "Australia/Melbourne".to_string(),
            UtcOffset::from_hms(11, 0, 0).expect("offset"),
            144.9666,
            -37.8166,
        )
        .await
        .expect("relocated");

        for body in chart_domain::BodyId::ALL {
            assert_eq!(
                relocated.ecliptic.get(body).longitude,
                radix.ecliptic.get(body).longitude
            );
        }
    }
}
