//! The pure trigonometric kernel behind mundane (Campanus) and right-ascension
//! projection. Every function here is a deterministic, side-effect-free
//! function of its numeric inputs — no ephemeris calls, no I/O — so the
//! ephemeris adapter's house-cusp solver can reuse the exact same forward
//! formula that projects bodies, rather than an independently-derived one.
//!
//! Variable names below (`theta`, `ax`, `ay`, `cz`, `cx`, …) intentionally
//! match the legacy solunar spreadsheet's naming rather than conventional
//! spherical-astronomy notation, because that is the only way to keep this
//! implementation checkable term-by-term against the reference algebra.

use crate::angle::normalize_degrees;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

#[inline]
fn d2r(deg: f64) -> f64 {
    deg * DEG_TO_RAD
}

#[inline]
fn r2d(rad: f64) -> f64 {
    rad * RAD_TO_DEG
}

/// Local Sidereal Time, hours in `[0, 24)`.
///
/// `jd_midnight` is the Julian Day of midnight on the same civil date as the
/// instant being framed (`ephemeris.julian_day(y, m, d, 0.0, 1)`), distinct
/// from the instant's own Julian Day. `civil_hour_fraction` and
/// `offset_hours` come from the civil `Instant` directly; LST is derived by
/// subtracting the UTC offset from the civil hour, not by re-deriving UTC
/// from a separately-projected UTC datetime.
pub fn local_sidereal_time(
    jd_midnight: f64,
    civil_hour_fraction: f64,
    offset_hours: f64,
    geo_longitude: f64,
) -> f64 {
    let universal_time = civil_hour_fraction - offset_hours;
    let t = (jd_midnight - 2_451_545.0) / 36525.0;
    let greenwich_sidereal_time =
        6.697_374_558 + 2_400.051_336 * t + 0.000_024_862 * t * t + universal_time * 1.002_737_909_3;
    let lst = (greenwich_sidereal_time + geo_longitude / 15.0) % 24.0;
    if lst < 0.0 {
        lst + 24.0
    } else {
        lst
    }
}

/// The precession-offset right ascension shared by both the mundane
/// (Campanus) projection and the standalone right-ascension projection:
///
/// ```text
/// theta = lambda + (360 - (330 + svp))
/// ax    = cos(theta)
/// delta'= asin( sin(beta)*cos(eps) + cos(beta)*sin(eps)*sin(theta) )
/// ay    = sin(theta)*cos(eps) - tan(beta)*sin(eps)
/// alpha0= atan(ay / ax)
/// alpha'= alpha0 + 180          if ax < 0
///       = alpha0 + 360          else if ay < 0
///       = alpha0                otherwise
/// ```
///
/// Returns `(alpha_prime, delta_prime_rad, ax, ay)` — the caller-visible
/// angle plus the intermediates the Campanus solver needs to continue the
/// derivation without recomputing them.
fn precessed_right_ascension_parts(
    longitude: f64,
    latitude: f64,
    obliquity: f64,
    svp: f64,
) -> (f64, f64, f64, f64) {
    let theta = longitude + (360.0 - (330.0 + svp));
    let theta_rad = d2r(theta);
    let beta_rad = d2r(latitude);
    let eps_rad = d2r(obliquity);

    let ax = theta_rad.cos();
    let delta_prime = (beta_rad.sin() * eps_rad.cos() + beta_rad.cos() * eps_rad.sin() * theta_rad.sin())
        .asin();
    let ay = theta_rad.sin() * eps_rad.cos() - beta_rad.tan() * eps_rad.sin();

    let alpha0 = r2d((ay / ax).atan());
    let alpha_prime = if ax < 0.0 {
        alpha0 + 180.0
    } else if ay < 0.0 {
        alpha0 + 360.0
    } else {
        alpha0
    };

    (alpha_prime, delta_prime, ax, ay)
}

/// Precessed right ascension of a body, degrees.
pub fn right_ascension(longitude: f64, latitude: f64, obliquity: f64, svp: f64) -> f64 {
    precessed_right_ascension_parts(longitude, latitude, obliquity, svp).0
}

/// Prime Vertical Longitude (Campanus mundane position) and 1-based house
/// index for a body.
///
/// `ramc` and `geo_latitude` are degrees; returns `(house, pvl)` with
/// `house in 1..=12` and `pvl in [0, 360)`.
pub fn prime_vertical_longitude(
    longitude: f64,
    latitude: f64,
    ramc: f64,
    obliquity: f64,
    svp: f64,
    geo_latitude: f64,
) -> (u8, f64) {
    let (alpha_prime, delta_prime, _ax, _ay) =
        precessed_right_ascension_parts(longitude, latitude, obliquity, svp);

    let h = ramc - alpha_prime;
    let h_rad = d2r(h);
    let phi_rad = d2r(geo_latitude);

    let cz = r2d(
        (1.0 / (phi_rad.cos() / h_rad.tan() + phi_rad.sin() * delta_prime.tan() / h_rad.sin())).atan(),
    );
    let cx = phi_rad.cos() * h_rad.cos() + phi_rad.sin() * delta_prime.tan();

    let pvl = normalize_degrees(if cx < 0.0 { 90.0 - cz } else { 270.0 - cz });
    #[allow(clippy::as_conversions)]
    let house = (pvl / 30.0).floor() as u8 + 1;

    (house, pvl)
}

/// The seven angles derivable in-component from `Asc`, `MC` and `Eq Asc`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedAngles {
    pub dsc: f64,
    pub ic: f64,
    pub eq_dsc: f64,
    pub ep: f64,
    pub zen: f64,
    pub wp: f64,
    pub ndr: f64,
}

/// Computes the derived angles from the three ephemeris-sourced angles.
pub fn derive_angles(asc: f64, mc: f64, eq_asc: f64) -> DerivedAngles {
    let dsc = normalize_degrees(asc + 180.0);
    let ic = normalize_degrees(mc + 180.0);
    DerivedAngles {
        dsc,
        ic,
        eq_dsc: normalize_degrees(eq_asc + 180.0),
        ep: normalize_degrees(mc + 90.0),
        zen: normalize_degrees(dsc + 90.0),
        wp: normalize_degrees(ic + 90.0),
        ndr: normalize_degrees(asc + 90.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lst_matches_hackensack_fixture() {
        // 2019-03-18 22:30:15 America/New_York, offset -4 (EDT), lon -74.1169
        let jd_midnight = 2_458_560.5; // 2019-03-18 00:00 UT
        let civil_hour_fraction = 22.0 + 30.0 / 60.0 + 15.0 / 3600.0;
        let lst = local_sidereal_time(jd_midnight, civil_hour_fraction, -4.0, -74.1169);
        assert!((lst - 9.325).abs() < 0.02, "lst={lst}");
    }

    #[test]
    fn derived_angles_follow_definitions() {
        let derived = derive_angles(194.254, 112.426, 0.0);
        assert!((derived.dsc - 14.254).abs() < 1e-9);
        assert!((derived.ic - 292.426).abs() < 1e-9);
    }

    #[test]
    fn house_is_in_range() {
        let (house, pvl) = prime_vertical_longitude(333.196, 0.0, 139.875, 23.436, 4.991, 40.9792);
        assert!((1..=12).contains(&house));
        assert!((0.0..360.0).contains(&pvl));
    }
}
