//! IANA timezone resolution for the civil-offset half of an [`Instant`] — the
//! `tz` string a `/radix` or `/returns` request carries resolves to a
//! `UtcOffset` through here rather than a hand-maintained offset table.

use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};
use time_tz::{OffsetDateTimeExt, OffsetResult, PrimitiveDateTimeExt, Tz};

use crate::InfraError;

/// Looks up an IANA zone by name (e.g. `"America/New_York"`).
pub fn lookup(tz_name: &str) -> Result<&'static Tz, InfraError> {
    tzdb::tz_by_name(tz_name).ok_or_else(|| InfraError::UnknownTimezone(tz_name.to_string()))
}

/// The civil UTC offset `tz_name` is observing at `instant_utc` — the
/// zone's DST rules are evaluated at that instant, not at lookup time.
pub fn offset_at(tz_name: &str, instant_utc: OffsetDateTime) -> Result<UtcOffset, InfraError> {
    let tz = lookup(tz_name)?;
    let local = instant_utc.to_timezone(tz);
    Ok(local.offset())
}

/// Resolves a naive civil datetime (no offset, as a `/radix`-style request
/// carries it) against an IANA zone name into an `OffsetDateTime`. DST-gap
/// ("spring forward") local times are rejected; DST-fold ("fall back")
/// ambiguity resolves to the earlier of the two offsets, matching the usual
/// civil convention of reporting pre-transition wall-clock time first.
pub fn resolve_civil(tz_name: &str, naive: PrimitiveDateTime) -> Result<OffsetDateTime, InfraError> {
    let tz = lookup(tz_name)?;
    match naive.assume_timezone(tz) {
        OffsetResult::Some(resolved) => Ok(resolved),
        OffsetResult::Ambiguous(earlier, _later) => Ok(earlier),
        OffsetResult::None => Err(InfraError::UnknownTimezone(format!(
            "{tz_name}: civil time {naive} falls in a DST gap"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn resolves_a_known_zone_to_its_observed_offset() {
        let instant = datetime!(2019-03-19 02:30:15 UTC);
        let offset = offset_at("America/New_York", instant).expect("resolves");
        assert_eq!(offset.whole_hours(), -4);
    }

    #[test]
    fn rejects_an_unknown_zone() {
        assert!(lookup("Not/AZone").is_err());
    }

    #[test]
    fn resolves_civil_hackensack_instant_to_utc() {
        use time::macros::datetime;
        let naive = datetime!(2019-03-18 22:30:15);
        let resolved = resolve_civil("America/New_York", naive).expect("resolves");
        assert_eq!(resolved, datetime!(2019-03-19 02:30:15 UTC));
    }
}
