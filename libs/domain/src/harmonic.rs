//! Pure harmonic-position arithmetic underlying the return solver. No
//! ephemeris calls happen here — only the longitude algebra that decides
//! whether a transiting body has "passed" a harmonic point of a radix
//! longitude, which the solver (in the application layer) drives with a
//! binary search over time.

use crate::angle::normalize_degrees;

/// The `n` valid harmonic positions of a natal longitude `lambda0`:
/// `{ (lambda0 + k*(360/n)) mod 360 : k = 1..=n }`. For `n = 1` this is the
/// single point `lambda0` itself (`k=1` wraps exactly one full turn back to
/// it); for `n = 4` the four quarters around the circle.
pub fn valid_harmonic_positions(lambda0: f64, n: u32) -> Vec<f64> {
    let step = 360.0 / f64::from(n);
    (1..=n)
        .map(|k| normalize_degrees(lambda0 + f64::from(k) * step))
        .collect()
}

/// The harmonic position of `lambda0` closest to a probe longitude `lambda_p`,
/// by unwrapped absolute difference (not circular distance — this matches
/// the legacy tool's `min(..., key=|x - probe|)` exactly).
pub fn closest_harmonic_pos(lambda0: f64, lambda_p: f64, n: u32) -> f64 {
    valid_harmonic_positions(lambda0, n)
        .into_iter()
        .min_by(|a, b| {
            (a - lambda_p)
                .abs()
                .partial_cmp(&(b - lambda_p).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(lambda0)
}

/// True iff the transiting longitude `lambda_p` has passed the closest
/// harmonic position of `lambda0` in the forward (increasing-longitude)
/// direction. Near the wrap seam (distance greater than half the harmonic
/// spacing) the naive `lambda_p > c` comparison is inverted, since the two
/// values are then on opposite sides of the 360/0 discontinuity.
pub fn is_past(lambda_p: f64, lambda0: f64, n: u32) -> bool {
    let c = closest_harmonic_pos(lambda0, lambda_p, n);
    let d = (lambda_p - c).abs();
    let past = lambda_p > c;
    let half_range = (360.0 / f64::from(n)) / 2.0;
    if d <= half_range {
        past
    } else {
        !past
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn n_equals_one_has_single_position() {
        let positions = valid_harmonic_positions(10.0, 1);
        assert_eq!(positions.len(), 1);
        assert!((positions[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn n_equals_four_has_quarters() {
        let positions = valid_harmonic_positions(10.0, 4);
        assert_eq!(positions.len(), 4);
        assert!((positions[0] - 100.0).abs() < 1e-9);
        assert!((positions[3] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn closest_harmonic_picks_the_nearest_generated_point() {
        // probe sits just past the 90-degree quarter point; the nearest
        // generated position should be that quarter, not the full circle
        // back to the radix itself.
        let c = closest_harmonic_pos(45.0, 136.0, 4);
        assert!((c - 135.0).abs() < 1e-9);
    }

    #[test]
    fn is_past_inverts_across_the_wrap_seam() {
        // lambda0=0, n=2: harmonic points at 180 and 360(=0).
        // A probe exactly opposite (180) with itself as closest point: distance 0, not > half-range.
        assert!(is_past(190.0, 0.0, 2));
        assert!(!is_past(170.0, 0.0, 2));
    }
}
