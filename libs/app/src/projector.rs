//! C3 — the `ChartProjector` (§4.2): pure functions that turn ecliptic
//! coordinates plus a framework into mundane (Campanus), right-ascension,
//! angle and cusp values. The trig kernel itself lives in
//! `chart_domain::math`; this module is the per-body/per-chart orchestration
//! around it, plus the one ephemeris call (`houses`) the projector still
//! needs for Asc/MC/Eq Asc.

use chart_domain::{
    Angles, BodyId, BodyMap, Cusps, EclipticCoords, EphemerisProvider, MundanePosition,
    SiderealFramework,
};
use tracing::warn;

/// Projects every body's mundane (Campanus) position against `framework`.
pub fn project_mundane(
    ecliptic: &BodyMap<EclipticCoords>,
    framework: &SiderealFramework,
) -> BodyMap<MundanePosition> {
    let mut mundane = BodyMap::default();
    for body in BodyId::ALL {
        let coords = ecliptic.get(body);
        let (house, pvl) = chart_domain::math::prime_vertical_longitude(
            coords.longitude,
            coords.latitude,
            framework.ramc,
            framework.obliquity,
            framework.svp,
            framework.geo_latitude,
        );
        mundane.set(body, MundanePosition { house, pvl });
    }
    mundane
}

/// Projects every body's precessed right ascension against `framework`.
pub fn project_right_ascension(
    ecliptic: &BodyMap<EclipticCoords>,
    framework: &SiderealFramework,
) -> BodyMap<f64> {
    let mut ra = BodyMap::default();
    for body in BodyId::ALL {
        let coords = ecliptic.get(body);
        let value = chart_domain::math::right_ascension(
            coords.longitude,
            coords.latitude,
            framework.obliquity,
            framework.svp,
        );
        ra.set(body, value);
    }
    ra
}

/// Queries the ephemeris `houses` operation and builds the ten named
/// angles plus the twelve Campanus cusps (§4.2). On a soft ephemeris
/// failure the angles/cusps are left at their zero default, matching the
/// same soft-failure discipline as the framework builder.
pub async fn project_angles_and_cusps(
    ephemeris: &dyn EphemerisProvider,
    jd: f64,
    ramc: f64,
    geo_latitude: f64,
) -> (Angles, Cusps) {
    match ephemeris.houses(jd, ramc, geo_latitude).await {
        Ok(houses) => (
            Angles::from_sourced(houses.asc, houses.mc, houses.eq_asc),
            Cusps(houses.cusps),
        ),
        Err(error) => {
            warn!(%error, "houses lookup failed, angles and cusps left zeroed");
            (Angles::default(), Cusps::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_mundane_fills_all_bodies() {
        let mut ecliptic: BodyMap<EclipticCoords> = BodyMap::default();
        ecliptic.set(
            BodyId::Sun,
            EclipticCoords {
                longitude: 333.196,
                ..EclipticCoords::ZERO
            },
        );
        let framework = SiderealFramework::new(-74.1169, 40.9792, 9.325, 4.991, 23.436);
        let mundane = project_mundane(&ecliptic, &framework);
        let sun = mundane.get(BodyId::Sun);
        assert!((1..=12).contains(&sun.house));
    }
}
