//! Julian Day, the UTC-based time scale every downstream calculation keys on.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A double-precision Julian Day number, UTC-based.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDay(pub f64);

impl JulianDay {
    /// J2000.0 epoch (January 1, 2000, 12:00 TT).
    pub const J2000: Self = Self(2_451_545.0);

    /// Creates a new Julian Day, rejecting non-finite or non-positive values.
    pub fn new(jd: f64) -> Result<Self, DomainError> {
        if jd.is_finite() && jd > 0.0 {
            Ok(Self(jd))
        } else {
            Err(DomainError::InvalidJulianDay(jd))
        }
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Days elapsed since the J2000.0 epoch; the usual centuries-since-J2000
    /// quantity (`T`) used throughout the sidereal time formula is
    /// `days_since_j2000() / 36525.0`.
    #[inline]
    pub fn days_since_j2000(self) -> f64 {
        self.0 - Self::J2000.0
    }

    #[inline]
    pub fn add_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonpositive_and_nan() {
        assert!(JulianDay::new(-1.0).is_err());
        assert!(JulianDay::new(f64::NAN).is_err());
        assert!(JulianDay::new(2_451_545.0).is_ok());
    }
}
