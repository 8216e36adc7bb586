//! A timezone-aware civil datetime kept in lock-step with its UTC projection.
//!
//! Resolving an IANA timezone name into a concrete UTC offset (with DST
//! rules) is an infrastructure concern; the domain layer only holds the pair
//! once it has been resolved and trusts the caller to have kept them
//! consistent. This mirrors the original tool's pendulum-backed datetime,
//! which always carried both representations together.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A civil datetime plus its UTC projection and the IANA timezone name it
/// was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Instant {
    pub local: OffsetDateTime,
    pub utc: OffsetDateTime,
}

impl Instant {
    /// Builds an `Instant` from an already-resolved civil/UTC pair.
    pub fn new(local: OffsetDateTime, utc: OffsetDateTime) -> Self {
        Self { local, utc }
    }

    /// Civil UTC offset in hours, fractional (e.g. `-4.0` for EDT).
    #[inline]
    pub fn offset_hours(&self) -> f64 {
        let whole_seconds = self.local.offset().whole_seconds();
        f64::from(whole_seconds) / 3600.0
    }

    /// Decimal hour-of-day for the civil datetime: `h + min/60 + s/3600`.
    pub fn civil_hour_fraction(&self) -> f64 {
        let time = self.local.time();
        f64::from(time.hour()) + f64::from(time.minute()) / 60.0 + f64::from(time.second()) / 3600.0
            + f64::from(time.nanosecond()) / 3_600_000_000_000.0
    }

    /// Decimal hour-of-day for the UTC projection, same form as
    /// [`Self::civil_hour_fraction`]. Ecliptic/ayanamsa/obliquity lookups key
    /// off the body's true (UTC) moment, not its civil wall-clock reading.
    pub fn utc_hour_fraction(&self) -> f64 {
        let time = self.utc.time();
        f64::from(time.hour()) + f64::from(time.minute()) / 60.0 + f64::from(time.second()) / 3600.0
            + f64::from(time.nanosecond()) / 3_600_000_000_000.0
    }
}
