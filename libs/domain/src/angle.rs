//! Degree-valued angles and the small set of display helpers the legacy
//! reporting tool carried (sign name, DMS conversion). No interpretation —
//! no orb tables, no aspect narrative — lives here; this is pure arithmetic.

/// A floating-point scalar in degrees. Most angles in this system are kept
/// normalized to `[0, 360)`; callers that need a signed or unnormalized value
/// say so explicitly.
pub type Angle = f64;

/// Normalizes an angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(deg: f64) -> Angle {
    let wrapped = deg % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// The twelve three-letter zodiac sign codes, tropical order starting at Aries.
pub const SIGN_CODES: [&str; 12] = [
    "Ari", "Tau", "Gem", "Can", "Leo", "Vir", "Lib", "Sco", "Sag", "Cap", "Aqu", "Pis",
];

/// Zodiac sign code for an ecliptic longitude.
pub fn zodiac_sign(longitude: Angle) -> &'static str {
    let normalized = normalize_degrees(longitude);
    #[allow(clippy::as_conversions)]
    let index = (normalized / 30.0) as usize;
    SIGN_CODES[index.min(11)]
}

/// Degrees/minutes/seconds triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: i32,
    pub minutes: i32,
    pub seconds: f64,
}

/// Converts a decimal degree value into degrees/minutes/seconds.
pub fn to_dms(decimal: f64) -> Dms {
    let sign = if decimal < 0.0 { -1 } else { 1 };
    let abs = decimal.abs();
    #[allow(clippy::as_conversions)]
    let degrees = abs.trunc() as i32;
    let minutes_f = abs.fract() * 60.0;
    #[allow(clippy::as_conversions)]
    let minutes = minutes_f.trunc() as i32;
    let seconds = minutes_f.fract() * 60.0;
    Dms {
        degrees: degrees * sign,
        minutes,
        seconds,
    }
}

/// Converts a degrees/minutes/seconds triple into a decimal degree value.
pub fn from_dms(degrees: i32, minutes: i32, seconds: f64) -> f64 {
    let sign = if degrees < 0 { -1.0 } else { 1.0 };
    let magnitude = f64::from(degrees.abs()) + f64::from(minutes) / 60.0 + seconds / 3600.0;
    sign * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_negative_and_overflowing_angles() {
        assert!((normalize_degrees(-10.0) - 350.0).abs() < 1e-9);
        assert!((normalize_degrees(370.0) - 10.0).abs() < 1e-9);
        assert!((normalize_degrees(0.0)).abs() < 1e-9);
    }

    #[test]
    fn sign_boundaries() {
        assert_eq!(zodiac_sign(0.0), "Ari");
        assert_eq!(zodiac_sign(29.999), "Ari");
        assert_eq!(zodiac_sign(30.0), "Tau");
        assert_eq!(zodiac_sign(359.999), "Pis");
    }

    #[test]
    fn dms_round_trip() {
        let dms = to_dms(194.254);
        assert_eq!(dms.degrees, 194);
        assert_eq!(dms.minutes, 15);
    }
}
