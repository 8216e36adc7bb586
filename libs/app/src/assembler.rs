//! C4 — the `ChartAssembler`: orchestrates C1 (ephemeris) through C3
//! (projector) to build a fully-populated [`Chart`] from
//! `(instant, longitude, latitude)` (§4.3).

use chart_domain::{BodyId, BodyMap, Chart, EclipticCoords, EphemerisProvider, Instant};
use tracing::warn;

use crate::{framework, projector, AppResult};

/// Builds a `Chart` for a civil instant and place (§4.3 steps 1–6).
///
/// Ephemeris failures for an individual body are soft (§4.3 "Failure"): the
/// body's `EclipticCoords` stays zeroed and the chart is still returned as
/// structurally valid.
pub async fn create_chart(
    ephemeris: &dyn EphemerisProvider,
    instant: Instant,
    tz_name: String,
    geo_longitude: f64,
    geo_latitude: f64,
    place_name: Option<String>,
) -> AppResult<Chart> {
    let jd = framework::julian_days(ephemeris, &instant).await?;
    let sidereal_framework =
        framework::build_framework(ephemeris, &instant, &jd, geo_longitude, geo_latitude).await;

    let mut ecliptic: BodyMap<EclipticCoords> = BodyMap::default();
    for body in BodyId::ALL {
        match ephemeris.calc_body(jd.at_instant, body).await {
            Ok(raw) => ecliptic.set(
                body,
                EclipticCoords {
                    longitude: raw.longitude,
                    latitude: raw.latitude,
                    distance: raw.distance,
                    d_longitude_dt: raw.d_longitude_dt,
                    d_latitude_dt: raw.d_latitude_dt,
                    d_distance_dt: raw.d_distance_dt,
                },
            ),
            Err(error) => {
                warn!(body = body.name(), %error, "ecliptic lookup failed, body left zeroed");
            }
        }
    }

    let mundane = projector::project_mundane(&ecliptic, &sidereal_framework);
    let right_ascension = projector::project_right_ascension(&ecliptic, &sidereal_framework);
    let (angles, cusps) = projector::project_angles_and_cusps(
        ephemeris,
        jd.at_instant,
        sidereal_framework.ramc,
        geo_latitude,
    )
    .await;

    Ok(Chart {
        local_datetime: instant.local,
        utc_datetime: instant.utc,
        tz_name,
        julian_day: chart_domain::JulianDay::new(jd.at_instant)?,
        framework: sidereal_framework,
        ecliptic,
        mundane,
        right_ascension,
        cusps,
        angles,
        place_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixtureEphemeris;

    #[tokio::test]
    async fn hackensack_chart_matches_fixture_angles() {
        let ephemeris = FixtureEphemeris::hackensack();
        let instant = ephemeris.hackensack_instant();
        let chart = create_chart(
            &ephemeris,
            instant,
            "America/New_York".to_string(),
            -74.1169,
            40.9792,
            None,
        )
        .await
        .expect("chart");

        assert!((chart.framework.ramc - chart.framework.lst * 15.0).abs() < f64::EPSILON);
        assert!(
            (chart.ecliptic_longitude(BodyId::Sun) - 333.196).abs() < 0.01,
            "sun={}",
            chart.ecliptic_longitude(BodyId::Sun)
        );
        assert!(
            (chart.ecliptic_longitude(BodyId::Moon) - 125.5073).abs() < 0.01,
            "moon={}",
            chart.ecliptic_longitude(BodyId::Moon)
        );
        assert!((chart.angles.asc - 194.254).abs() < 0.05, "asc={}", chart.angles.asc);
        assert!((chart.angles.mc - 112.426).abs() < 0.05, "mc={}", chart.angles.mc);
        assert!(
            (chart.cusps.get(4) - 292.426).abs() < 0.05,
            "cusp4={}",
            chart.cusps.get(4)
        );
    }
}
