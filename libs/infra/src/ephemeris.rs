//! The production [`EphemerisProvider`] adapter.
//!
//! Backed by the `astro` crate's VSOP87 (planets) and ELP-2000 (Moon) series
//! for Sun/Moon/the eight major planets, a low-precision analytic model for
//! Pluto (outside VSOP87's coverage), a Laskar mean-obliquity formula, and a
//! linear Fagan/Bradley ayanamsa approximation anchored at J2000.0. Campanus
//! house cusps are solved against `chart_domain::math`'s own forward
//! Prime-Vertical-Longitude kernel by bisection, rather than introduced as an
//! independent algorithm.
//!
//! Unlike the legacy Swiss-Ephemeris-backed tool, `astro`'s routines are pure
//! functions with no process-global handle to serialize access to, so this
//! adapter carries no internal mutex (§5's Open Question, resolved in
//! DESIGN.md).

use async_trait::async_trait;
use astro::{angle, ecliptic, lunar, planet, sun};
use chart_domain::{BodyId, HousesOutput, PortResult, RawEclipticOutput};

use crate::InfraError;

/// Astronomical unit, kilometers — `astro::lunar::geocent_ecl_pos` reports
/// the Moon's distance in kilometers, while every other body here is kept in
/// AU.
const AU_IN_KM: f64 = 149_597_870.7;

/// Fagan/Bradley ayanamsa at J2000.0, degrees.
const FAGAN_BRADLEY_J2000_DEG: f64 = 24.736;

/// General precession in longitude, degrees per Julian year (~50.29"/yr).
const ANNUAL_PRECESSION_DEG: f64 = 50.290_966 / 3600.0;

/// Pluto's osculating heliocentric elements at J2000.0 (Meeus-style
/// low-precision mean-element model; VSOP87 does not cover Pluto).
mod pluto {
    /// Semi-major axis, AU.
    pub const A: f64 = 39.482_117;
    /// Eccentricity.
    pub const E: f64 = 0.248_808;
    /// Inclination to the ecliptic, degrees.
    pub const I_DEG: f64 = 17.141_75;
    /// Longitude of ascending node, degrees.
    pub const NODE_DEG: f64 = 110.307_47;
    /// Argument of perihelion, degrees.
    pub const PERI_DEG: f64 = 113.763_29;
    /// Mean longitude at J2000.0, degrees.
    pub const MEAN_LONGITUDE_J2000_DEG: f64 = 238.928_81;
    /// Mean daily motion, degrees/day.
    pub const MEAN_MOTION_DEG_PER_DAY: f64 = 0.003_958_0;
}

/// Solves Kepler's equation `M = E - e*sin(E)` for the eccentric anomaly,
/// Newton-Raphson, radians in and out.
fn solve_kepler(mean_anomaly_rad: f64, eccentricity: f64) -> f64 {
    let mut eccentric_anomaly = mean_anomaly_rad;
    for _ in 0..30 {
        let delta = (eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly_rad)
            / (1.0 - eccentricity * eccentric_anomaly.cos());
        eccentric_anomaly -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    eccentric_anomaly
}

/// Pluto's heliocentric ecliptic position at `jd`: `(longitude_rad,
/// latitude_rad, radius_vector_au)`, via two-body Kepler motion on the
/// osculating J2000.0 elements. Adequate to the 0.01° angular tolerance this
/// core targets for the outermost, slowest-moving body; not an ephemeris-
/// grade perturbation theory.
fn pluto_heliocentric(jd: f64) -> (f64, f64, f64) {
    let days_since_j2000 = jd - chart_domain::JulianDay::J2000.as_f64();
    let mean_longitude = (pluto::MEAN_LONGITUDE_J2000_DEG
        + pluto::MEAN_MOTION_DEG_PER_DAY * days_since_j2000)
        % 360.0;
    let mean_anomaly_deg = (mean_longitude - pluto::PERI_DEG - pluto::NODE_DEG + 360.0) % 360.0;
    let mean_anomaly_rad = mean_anomaly_deg.to_radians();

    let eccentric_anomaly = solve_kepler(mean_anomaly_rad, pluto::E);
    let true_anomaly = 2.0
        * (((1.0 + pluto::E) / (1.0 - pluto::E)).sqrt() * (eccentric_anomaly / 2.0).tan()).atan();
    let radius_vector = pluto::A * (1.0 - pluto::E * eccentric_anomaly.cos());

    let argument_of_latitude = true_anomaly + pluto::PERI_DEG.to_radians();
    let inclination = pluto::I_DEG.to_radians();
    let node = pluto::NODE_DEG.to_radians();

    let sin_u = argument_of_latitude.sin();
    let cos_u = argument_of_latitude.cos();

    // Orbital-plane-to-ecliptic projection (Meeus ch. 33).
    let x_orbital = radius_vector * cos_u;
    let y_orbital = radius_vector * sin_u * inclination.cos();
    let z_orbital = radius_vector * sin_u * inclination.sin();

    let x = x_orbital * node.cos() - y_orbital * node.sin();
    let y = x_orbital * node.sin() + y_orbital * node.cos();
    let z = z_orbital;

    let helio_longitude = y.atan2(x);
    let helio_latitude = (z / (x * x + y * y + z * z).sqrt()).asin();
    let radius = (x * x + y * y + z * z).sqrt();

    (helio_longitude, helio_latitude, radius)
}

/// Reduces a body's heliocentric ecliptic position plus Earth's own
/// heliocentric position to a geocentric ecliptic longitude/latitude
/// (Meeus ch. 33's rectangular-coordinate subtraction).
fn heliocentric_to_geocentric(
    body: (f64, f64, f64),
    earth: (f64, f64, f64),
) -> (f64, f64) {
    let (body_long, body_lat, body_radius) = body;
    let (earth_long, earth_lat, earth_radius) = earth;

    let bx = body_radius * body_lat.cos() * body_long.cos();
    let by = body_radius * body_lat.cos() * body_long.sin();
    let bz = body_radius * body_lat.sin();

    let ex = earth_radius * earth_lat.cos() * earth_long.cos();
    let ey = earth_radius * earth_lat.cos() * earth_long.sin();
    let ez = earth_radius * earth_lat.sin();

    let x = bx - ex;
    let y = by - ey;
    let z = bz - ez;

    let geocentric_longitude = y.atan2(x);
    let geocentric_latitude = (z / (x * x + y * y + z * z).sqrt()).asin();

    (geocentric_longitude, geocentric_latitude)
}

fn earth_heliocentric(jd: f64) -> (f64, f64, f64) {
    planet::heliocent_coords(&planet::Planet::Earth, jd)
}

/// Geocentric tropical ecliptic longitude/latitude of a body, degrees, plus
/// its geocentric distance in AU. Sun and Moon use `astro`'s own geocentric
/// routines directly; the eight VSOP87-covered planets are reduced from
/// heliocentric coordinates; Pluto uses the analytic model above.
fn geocentric_ecliptic_degrees(jd: f64, body: BodyId) -> (f64, f64, f64) {
    match body {
        BodyId::Sun => {
            let (point, radius) = sun::geocent_ecl_pos(jd);
            (point.long.to_degrees(), point.lat.to_degrees(), radius)
        }
        BodyId::Moon => {
            let (point, distance_km) = lunar::geocent_ecl_pos(jd);
            (point.long.to_degrees(), point.lat.to_degrees(), distance_km / AU_IN_KM)
        }
        BodyId::Pluto => {
            let earth = earth_heliocentric(jd);
            let pluto = pluto_heliocentric(jd);
            let (long, lat) = heliocentric_to_geocentric(pluto, earth);
            (angle::limit_to_360(long.to_degrees()), lat.to_degrees(), pluto.2)
        }
        _ => {
            let target = vsop87_planet(body);
            let earth = earth_heliocentric(jd);
            let helio = planet::heliocent_coords(&target, jd);
            let (long, lat) = heliocentric_to_geocentric(helio, earth);
            (angle::limit_to_360(long.to_degrees()), lat.to_degrees(), helio.2)
        }
    }
}

fn vsop87_planet(body: BodyId) -> planet::Planet {
    match body {
        BodyId::Mercury => planet::Planet::Mercury,
        BodyId::Venus => planet::Planet::Venus,
        BodyId::Mars => planet::Planet::Mars,
        BodyId::Jupiter => planet::Planet::Jupiter,
        BodyId::Saturn => planet::Planet::Saturn,
        BodyId::Uranus => planet::Planet::Uranus,
        BodyId::Neptune => planet::Planet::Neptune,
        BodyId::Sun | BodyId::Moon | BodyId::Pluto => {
            unreachable!("Sun, Moon and Pluto are handled by their own branches")
        }
    }
}

/// Finite-difference rate of change, degrees/day, sampling 6 hours apart.
/// `astro` exposes instantaneous positions, not velocities, so the adapter
/// derives the rate the same way a numerical ephemeris consumer would.
fn rate_of_change(jd: f64, body: BodyId, extract: impl Fn((f64, f64, f64)) -> f64) -> f64 {
    const STEP_DAYS: f64 = 0.25;
    let before = extract(geocentric_ecliptic_degrees(jd - STEP_DAYS, body));
    let after = extract(geocentric_ecliptic_degrees(jd + STEP_DAYS, body));
    (after - before) / (2.0 * STEP_DAYS)
}

/// Converts a proleptic Gregorian calendar date plus hour fraction into a
/// Julian Day via `astro::time`'s own calendar-to-JD routine.
fn calendar_to_julian_day(year: i32, month: u8, day: u8, hour_fraction: f64) -> f64 {
    let date = astro::time::Date {
        year: i16::try_from(year).unwrap_or(i16::MAX),
        month,
        decimal_day: f64::from(day) + hour_fraction / 24.0,
        cal_type: astro::time::CalType::Gregorian,
    };
    astro::time::julian_day(&date)
}

/// The production ephemeris adapter.
pub struct AstroEphemerisProvider;

impl AstroEphemerisProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AstroEphemerisProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl chart_domain::EphemerisProvider for AstroEphemerisProvider {
    async fn julian_day(&self, year: i32, month: u8, day: u8, hour_fraction: f64) -> PortResult<f64> {
        Ok(calendar_to_julian_day(year, month, day, hour_fraction))
    }

    async fn calc_body(&self, jd: f64, body: BodyId) -> PortResult<RawEclipticOutput> {
        let (longitude, latitude, distance) = geocentric_ecliptic_degrees(jd, body);
        let d_longitude_dt = rate_of_change(jd, body, |(long, _, _)| long);
        let d_latitude_dt = rate_of_change(jd, body, |(_, lat, _)| lat);
        let d_distance_dt = rate_of_change(jd, body, |(_, _, dist)| dist);

        Ok(RawEclipticOutput {
            longitude: chart_domain::normalize_degrees(longitude),
            latitude,
            distance,
            d_longitude_dt,
            d_latitude_dt,
            d_distance_dt,
        })
    }

    async fn obliquity(&self, jd: f64) -> PortResult<f64> {
        Ok(ecliptic::mn_oblq_laskar(jd).to_degrees())
    }

    async fn ayanamsa(&self, jd: f64) -> PortResult<f64> {
        let years_since_j2000 = (jd - chart_domain::JulianDay::J2000.as_f64()) / 365.25;
        Ok(FAGAN_BRADLEY_J2000_DEG + ANNUAL_PRECESSION_DEG * years_since_j2000)
    }

    async fn houses(&self, jd: f64, ramc: f64, geo_latitude: f64) -> PortResult<HousesOutput> {
        let obliquity = self.obliquity(jd).await?;
        let ayanamsa = self.ayanamsa(jd).await?;
        let svp = 30.0 - ayanamsa;

        Ok(crate::houses::solve_campanus_houses(ramc, obliquity, svp, geo_latitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ayanamsa_is_positive_near_j2000() {
        let svp_anchor = FAGAN_BRADLEY_J2000_DEG;
        assert!((20.0..30.0).contains(&svp_anchor));
    }

    #[test]
    fn solve_kepler_converges_for_plutos_eccentricity() {
        let eccentric_anomaly = solve_kepler(1.0, pluto::E);
        let mean_anomaly = eccentric_anomaly - pluto::E * eccentric_anomaly.sin();
        assert!((mean_anomaly - 1.0).abs() < 1e-9);
    }

    #[test]
    fn calendar_round_trips_through_julian_day() {
        let jd = calendar_to_julian_day(2019, 3, 18, 0.0);
        assert!((jd - 2_458_560.5).abs() < 1e-6, "jd={jd}");
    }
}
