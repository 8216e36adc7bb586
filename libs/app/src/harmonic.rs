//! C6 — the `HarmonicReturnSolver` (§4.5): binary search over time for the
//! instant a transiting body reaches a valid harmonic position of a radix
//! longitude, plus the successive-return generation built on top of it.

use chart_domain::{BodyId, DomainError, DomainResult, EphemerisProvider};
use time::{Duration, OffsetDateTime};

use crate::{AppError, AppResult};

/// A time unit the binary search can step in (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl Precision {
    /// Parses the wire-contract unit name, case-sensitive lowercase plural.
    pub fn from_str(value: &str) -> DomainResult<Self> {
        match value {
            "seconds" => Ok(Self::Seconds),
            "minutes" => Ok(Self::Minutes),
            "hours" => Ok(Self::Hours),
            "days" => Ok(Self::Days),
            "weeks" => Ok(Self::Weeks),
            "months" => Ok(Self::Months),
            "years" => Ok(Self::Years),
            other => Err(DomainError::UnknownPrecisionUnit(other.to_string())),
        }
    }

    /// One unit of this precision, as a `time::Duration`. Months/years use
    /// the same fixed-length approximation the legacy tool's
    /// `pendulum.add(months=...)`/`add(years=...)` calendar arithmetic
    /// resolves to when driven purely by an integer unit count inside a
    /// binary search (30/365.25 days) — the search only ever needs this to
    /// bracket and bisect an interval, not to render a calendar date.
    fn unit_duration(self) -> Duration {
        match self {
            Self::Seconds => Duration::seconds(1),
            Self::Minutes => Duration::minutes(1),
            Self::Hours => Duration::hours(1),
            Self::Days => Duration::days(1),
            Self::Weeks => Duration::weeks(1),
            Self::Months => Duration::days(30),
            Self::Years => Duration::days(365),
        }
    }
}

/// Orbital period constants, minutes (§4.5, §6.4). The minute-precision
/// table is authoritative per spec.md's Open Questions resolution.
pub fn orbital_period_minutes(body: BodyId) -> Option<f64> {
    match body {
        BodyId::Sun => Some(525_968.0),
        BodyId::Moon => Some(39_344.0),
        _ => None,
    }
}

fn orbital_period_hours(body: BodyId) -> AppResult<f64> {
    orbital_period_minutes(body)
        .map(|minutes| minutes / 60.0)
        .ok_or_else(|| {
            AppError::Internal(format!(
                "no orbital period constant for body {}",
                body.name()
            ))
        })
}

/// Validates the argument errors §7 requires raised fatally before any
/// search begins: harmonic out of `[1, 36]`, and the Moon restricted to
/// harmonics `<= 4`.
pub fn validate_harmonic_args(body: BodyId, harmonic: u32) -> DomainResult<()> {
    if !(1..=36).contains(&harmonic) {
        return Err(DomainError::HarmonicOutOfRange(harmonic));
    }
    if body == BodyId::Moon && harmonic > 4 {
        return Err(DomainError::MoonHarmonicTooHigh(harmonic));
    }
    Ok(())
}

/// Probes a body's ecliptic longitude at an arbitrary UTC instant.
async fn probe_longitude(
    ephemeris: &dyn EphemerisProvider,
    body: BodyId,
    utc: OffsetDateTime,
) -> AppResult<f64> {
    let jd = ephemeris
        .julian_day(
            utc.year(),
            u8::from(utc.month()),
            utc.day(),
            f64::from(utc.hour()) + f64::from(utc.minute()) / 60.0 + f64::from(utc.second()) / 3600.0,
        )
        .await?;
    let raw = ephemeris.calc_body(jd, body).await?;
    Ok(raw.longitude)
}

/// Binary search `find_harmonic_in_range` (§4.5): finds the instant in
/// `[t_start, t_end]` at which the body reaches a valid harmonic position
/// of `lambda0`, to the requested `precision`. Widens `t_end` by one hour
/// at a time first, to guarantee the target lies in the window.
pub async fn find_harmonic_in_range(
    ephemeris: &dyn EphemerisProvider,
    n: u32,
    body: BodyId,
    lambda0: f64,
    t_start: OffsetDateTime,
    t_end: OffsetDateTime,
    precision: Precision,
) -> AppResult<OffsetDateTime> {
    let mut start = t_start;
    let mut end = t_end;

    loop {
        let end_pos = probe_longitude(ephemeris, body, end).await?;
        if chart_domain::harmonic::is_past(end_pos, lambda0, n) {
            break;
        }
        start = end;
        end += Duration::hours(1);
    }

    let unit = precision.unit_duration();
    let total_span = end - start;
    let units_in_span = (total_span.whole_nanoseconds() / unit.whole_nanoseconds()).max(0);
    let mut ceiling = i64::try_from(units_in_span).unwrap_or(i64::MAX);
    let mut floor: i64 = 0;
    let mut test_instant = start;

    while ceiling > floor {
        let midpoint = ((ceiling - floor) / 2) + floor;
        test_instant = start + unit * i32::try_from(midpoint).unwrap_or(i32::MAX);
        let test_pos = probe_longitude(ephemeris, body, test_instant).await?;
        if chart_domain::harmonic::is_past(test_pos, lambda0, n) {
            ceiling = midpoint - 1;
        } else {
            floor = midpoint + 1;
        }
    }

    Ok(test_instant)
}

/// Nearest return (§4.5 step 1): searches backward and forward windows of
/// `ceil(orbital_period_hours / n)` hours around `anchor` at hour
/// precision, and picks whichever hit is closer to `anchor`.
pub async fn nearest_return(
    ephemeris: &dyn EphemerisProvider,
    body: BodyId,
    n: u32,
    lambda0: f64,
    anchor: OffsetDateTime,
) -> AppResult<OffsetDateTime> {
    let period_hours = orbital_period_hours(body)?;
    #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
    let delta_hours = (period_hours / f64::from(n)).ceil() as i64;

    let earliest = anchor - Duration::hours(delta_hours);
    let latest = anchor + Duration::hours(delta_hours);

    let past = find_harmonic_in_range(ephemeris, n, body, lambda0, earliest, anchor, Precision::Hours).await;
    let future = find_harmonic_in_range(ephemeris, n, body, lambda0, anchor, latest, Precision::Hours).await;

    match (past, future) {
        (Ok(p), Ok(f)) => {
            if (anchor - p).abs() <= (f - anchor).abs() {
                Ok(p)
            } else {
                Ok(f)
            }
        }
        (Ok(p), Err(_)) => Ok(p),
        (Err(_), Ok(f)) => Ok(f),
        (Err(_), Err(_)) => Err(AppError::SearchFailed {
            window_start: earliest.to_string(),
            window_end: latest.to_string(),
        }),
    }
}

/// Successive-return generation (§4.5 steps 1–3): nearest return, then
/// stepping at an approximate interval with a refinement window at seconds
/// precision for every hit, including the first.
pub async fn return_time_list(
    ephemeris: &dyn EphemerisProvider,
    body: BodyId,
    n: u32,
    lambda0: f64,
    anchor: OffsetDateTime,
    quantity: u32,
) -> AppResult<Vec<OffsetDateTime>> {
    let period_hours = orbital_period_hours(body)?;
    #[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
    let delta_hours = ((period_hours / f64::from(n)).floor() as i64) - 24;
    let buffer_hours = delta_hours / 2;
    let quantity = usize::try_from(quantity).unwrap_or(usize::MAX);

    let mut hour_precision_hits = Vec::with_capacity(quantity);
    let first = nearest_return(ephemeris, body, n, lambda0, anchor).await?;
    hour_precision_hits.push(first);

    let mut window_start = first + Duration::hours(delta_hours - buffer_hours);
    let mut window_end = first + Duration::hours(delta_hours + buffer_hours);

    while hour_precision_hits.len() < quantity {
        let next = find_harmonic_in_range(
            ephemeris,
            n,
            body,
            lambda0,
            window_start,
            window_end,
            Precision::Seconds,
        )
        .await
        .map_err(|_| AppError::SearchFailed {
            window_start: window_start.to_string(),
            window_end: window_end.to_string(),
        })?;
        window_start = next + Duration::hours(delta_hours - buffer_hours);
        window_end = next + Duration::hours(delta_hours + buffer_hours);
        hour_precision_hits.push(next);
    }

    let mut refined = Vec::with_capacity(hour_precision_hits.len());
    for hit in hour_precision_hits {
        let refine_start = hit - Duration::hours(6);
        let refine_end = hit + Duration::hours(6);
        let match_instant = find_harmonic_in_range(
            ephemeris,
            n,
            body,
            lambda0,
            refine_start,
            refine_end,
            Precision::Seconds,
        )
        .await?;
        refined.push(match_instant);
    }

    Ok(refined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_harmonic() {
        assert!(validate_harmonic_args(BodyId::Sun, 0).is_err());
        assert!(validate_harmonic_args(BodyId::Sun, 37).is_err());
        assert!(validate_harmonic_args(BodyId::Sun, 36).is_ok());
    }

    #[test]
    fn rejects_moon_harmonic_above_four() {
        assert!(validate_harmonic_args(BodyId::Moon, 5).is_err());
        assert!(validate_harmonic_args(BodyId::Moon, 4).is_ok());
    }

    #[test]
    fn precision_parses_known_units() {
        assert_eq!(Precision::from_str("seconds").expect("parses"), Precision::Seconds);
        assert!(Precision::from_str("fortnights").is_err());
    }
}
