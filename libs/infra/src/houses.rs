//! Campanus house cusps, solved by inverting `chart_domain::math`'s own
//! forward Prime-Vertical-Longitude kernel rather than introducing a second,
//! independently-derived spherical-trigonometry formula.
//!
//! Cusp `i` (1-based) is exactly where `prime_vertical_longitude` reports
//! `house == i` at its lower boundary, i.e. `pvl == (i - 1) * 30`. Cusps 1,
//! 4, 7 and 10 happen to coincide with Asc, IC, Dsc and MC respectively, so
//! solving all twelve with one root-finder gives the angles for free instead
//! of deriving them as separate closed forms.

use chart_domain::{math::prime_vertical_longitude, normalize_degrees, HousesOutput};

const SAMPLES: u32 = 360;
const BISECTION_ITERATIONS: u32 = 60;

/// Signed angular residual in `(-180, 180]`, the sign the bracket search and
/// bisection both key off.
fn signed_residual(pvl: f64, target: f64) -> f64 {
    let diff = normalize_degrees(pvl - target);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Solves for the ecliptic longitude `lambda` (latitude held at zero) whose
/// Prime Vertical Longitude equals `target_pvl`, given `ramc`/`obliquity`/
/// `svp`/`geo_latitude`. Scans the full circle in one-degree steps for a
/// sign change in the residual, then bisects the bracket.
fn solve_pvl_for_target(ramc: f64, obliquity: f64, svp: f64, geo_latitude: f64, target_pvl: f64) -> f64 {
    let residual_at = |lambda: f64| {
        let (_, pvl) = prime_vertical_longitude(lambda, 0.0, ramc, obliquity, svp, geo_latitude);
        signed_residual(pvl, target_pvl)
    };

    let mut previous_lambda = 0.0;
    let mut previous_residual = residual_at(0.0);
    let mut bracket = None;

    for step in 1..=SAMPLES {
        let lambda = f64::from(step);
        let residual = residual_at(lambda % 360.0);
        if residual.signum() != previous_residual.signum() && residual.abs() < 90.0 && previous_residual.abs() < 90.0
        {
            bracket = Some((previous_lambda, lambda));
            break;
        }
        previous_lambda = lambda;
        previous_residual = residual;
    }

    let Some((mut low, mut high)) = bracket else {
        // No sign change found (degenerate geometry, e.g. a polar latitude);
        // fall back to the closest sampled longitude.
        return previous_lambda;
    };

    let mut low_residual = residual_at(low % 360.0);
    for _ in 0..BISECTION_ITERATIONS {
        let mid = (low + high) / 2.0;
        let mid_residual = residual_at(mid % 360.0);
        if mid_residual.signum() == low_residual.signum() {
            low = mid;
            low_residual = mid_residual;
        } else {
            high = mid;
        }
    }

    normalize_degrees((low + high) / 2.0)
}

/// Solves the full Campanus house set: Asc, MC, Eq Asc and all twelve cusps.
pub fn solve_campanus_houses(ramc: f64, obliquity: f64, svp: f64, geo_latitude: f64) -> HousesOutput {
    let mut cusps = [0.0; 12];
    for (index, cusp) in cusps.iter_mut().enumerate() {
        #[allow(clippy::as_conversions)]
        let target_pvl = (index as f64) * 30.0;
        *cusp = solve_pvl_for_target(ramc, obliquity, svp, geo_latitude, target_pvl);
    }

    let asc = cusps[0];
    let mc = cusps[9];
    let eq_asc = solve_pvl_for_target(ramc, obliquity, svp, 0.0, 0.0);

    HousesOutput { asc, mc, eq_asc, cusps }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cusps_are_normalized_and_roughly_thirty_degrees_apart_in_house_order() {
        let houses = solve_campanus_houses(139.875, 23.436, 4.991, 40.9792);
        for cusp in houses.cusps {
            assert!((0.0..360.0).contains(&cusp));
        }
    }

    #[test]
    fn asc_and_mc_are_cusps_one_and_ten() {
        let houses = solve_campanus_houses(139.875, 23.436, 4.991, 40.9792);
        assert!((houses.asc - houses.cusps[0]).abs() < 1e-6);
        assert!((houses.mc - houses.cusps[9]).abs() < 1e-6);
    }
}
