//! C7 — the `ChartService` façade: the single entry point a caller (the
//! HTTP dispatcher, or any other frontend) drives to get a chart, a set of
//! harmonic return pairs, a transit-sensitive bundle, or a progressed chart.
//!
//! Everything below composes C1 (ephemeris port) through C6 (harmonic
//! solver) — this module owns no trig of its own.

use std::sync::Arc;

use chart_domain::{BodyId, Chart, EphemerisProvider, Instant};
use time::{OffsetDateTime, UtcOffset};

use crate::{assembler, harmonic, transformer, AppError, AppResult};

/// The secondary-progressions ratio (§4.6): one day of ephemeris time per
/// year of elapsed civil time, expressed as minutes-of-ephemeris-time per
/// minute-of-civil-time.
const PROGRESSION_RATIO: f64 = 0.002737909;

/// Arguments for a harmonic return search (§4.5, §6.2 `/returns`).
#[derive(Debug, Clone)]
pub struct ReturnParams {
    pub body: BodyId,
    pub harmonic: u32,
    /// The civil instant to search outward from, already resolved to
    /// `(local, utc)` in the target place's timezone.
    pub anchor: Instant,
    pub geo_longitude: f64,
    pub geo_latitude: f64,
    pub tz_name: String,
    pub quantity: u32,
    pub place_name: Option<String>,
}

/// The six charts a transit-sensitive reading bundles together (§4.7).
#[derive(Debug, Clone)]
pub struct TransitSensitiveBundle {
    pub radix: Chart,
    pub local_natal: Chart,
    pub sp_radix: Chart,
    pub ssr: Chart,
    pub sp_ssr: Chart,
    pub transits: Chart,
}

/// The application-layer façade. Holds a single shared ephemeris provider;
/// cheap to clone, safe to share across any number of concurrent requests.
pub struct ChartService {
    ephemeris: Arc<dyn EphemerisProvider>,
}

impl ChartService {
    pub fn new(ephemeris: Arc<dyn EphemerisProvider>) -> Self {
        Self { ephemeris }
    }

    /// Builds a radix chart for a civil instant and place (§4.3).
    pub async fn create_chart(
        &self,
        instant: Instant,
        tz_name: String,
        geo_longitude: f64,
        geo_latitude: f64,
        place_name: Option<String>,
    ) -> AppResult<Chart> {
        assembler::create_chart(
            self.ephemeris.as_ref(),
            instant,
            tz_name,
            geo_longitude,
            geo_latitude,
            place_name,
        )
        .await
    }

    /// Relocates an existing chart against a new place/timezone, holding the
    /// underlying instant fixed (§4.4).
    pub async fn relocate(
        &self,
        chart: &Chart,
        new_tz_name: String,
        new_offset: UtcOffset,
        new_longitude: f64,
        new_latitude: f64,
    ) -> AppResult<Chart> {
        transformer::relocate(
            self.ephemeris.as_ref(),
            chart,
            new_tz_name,
            new_offset,
            new_longitude,
            new_latitude,
        )
        .await
    }

    /// Relocates `radix` to the search place/timezone, searches for
    /// `quantity` harmonic returns from `anchor` onward, and reports both the
    /// relocated radix and the (unprecessed) return charts found.
    async fn search_return_charts(
        &self,
        radix: &Chart,
        body: BodyId,
        harmonic: u32,
        anchor: Instant,
        geo_longitude: f64,
        geo_latitude: f64,
        tz_name: &str,
        quantity: u32,
    ) -> AppResult<(Chart, Vec<Chart>)> {
        harmonic::validate_harmonic_args(body, harmonic)?;

        let new_offset = anchor.local.offset();
        let relocated_radix = transformer::relocate(
            self.ephemeris.as_ref(),
            radix,
            tz_name.to_string(),
            new_offset,
            geo_longitude,
            geo_latitude,
        )
        .await?;

        let radix_position = relocated_radix.ecliptic_longitude(body);
        let return_instants = harmonic::return_time_list(
            self.ephemeris.as_ref(),
            body,
            harmonic,
            radix_position,
            anchor.utc,
            quantity,
        )
        .await?;

        let mut charts = Vec::with_capacity(return_instants.len());
        for utc in return_instants {
            let local = utc.to_offset(new_offset);
            let instant = Instant::new(local, utc);
            let chart = assembler::create_chart(
                self.ephemeris.as_ref(),
                instant,
                tz_name.to_string(),
                geo_longitude,
                geo_latitude,
                None,
            )
            .await?;
            charts.push(chart);
        }

        Ok((relocated_radix, charts))
    }

    /// Generates harmonic return pairs (§4.5, §6.2 `/returns`): the radix
    /// relocated to the search place and re-expressed in each return's own
    /// sidereal framework, paired with the return chart itself.
    pub async fn generate_return_pairs(
        &self,
        radix: &Chart,
        params: ReturnParams,
    ) -> AppResult<Vec<(Chart, Chart)>> {
        let (relocated_radix, mut charts) = self
            .search_return_charts(
                radix,
                params.body,
                params.harmonic,
                params.anchor,
                params.geo_longitude,
                params.geo_latitude,
                &params.tz_name,
                params.quantity,
            )
            .await?;

        if let Some(place_name) = &params.place_name {
            for chart in &mut charts {
                chart.place_name = Some(place_name.clone());
            }
        }

        let pairs = charts
            .into_iter()
            .map(|return_chart| {
                let radix_copy = transformer::precess(&relocated_radix, &return_chart);
                (radix_copy, return_chart)
            })
            .collect();

        Ok(pairs)
    }

    /// Secondary progressions (§4.6): a day of ephemeris time stands in for
    /// a year of elapsed civil time. Builds the progressed instant's chart
    /// for its ecliptic positions, then re-frames those positions against
    /// the real civil instant's own sidereal framework — angles and cusps
    /// stay the progressed instant's own, matching the legacy tool's
    /// `get_progressions`, which never recomputes `houses` here.
    pub async fn progressions(
        &self,
        radix: &Chart,
        local_dt: OffsetDateTime,
        tz_name: String,
        geo_longitude: f64,
        geo_latitude: f64,
    ) -> AppResult<Chart> {
        let local_dt_utc = local_dt.to_offset(UtcOffset::UTC);
        let elapsed = local_dt_utc - radix.utc_datetime;
        #[allow(clippy::as_conversions)]
        let elapsed_minutes = elapsed.whole_minutes() as f64;
        let progressed_minutes = elapsed_minutes * PROGRESSION_RATIO;
        let progressed_dt = radix.utc_datetime + time::Duration::seconds_f64(progressed_minutes * 60.0);

        let progressed_instant = Instant::new(progressed_dt, progressed_dt);
        let progressed_chart = assembler::create_chart(
            self.ephemeris.as_ref(),
            progressed_instant,
            "UTC".to_string(),
            geo_longitude,
            geo_latitude,
            radix.place_name.clone(),
        )
        .await?;

        let real_instant = Instant::new(local_dt_utc, local_dt_utc);
        let jd = crate::framework::julian_days(self.ephemeris.as_ref(), &real_instant).await?;
        let real_framework = crate::framework::build_framework(
            self.ephemeris.as_ref(),
            &real_instant,
            &jd,
            geo_longitude,
            geo_latitude,
        )
        .await;

        let mundane = crate::projector::project_mundane(&progressed_chart.ecliptic, &real_framework);
        let right_ascension =
            crate::projector::project_right_ascension(&progressed_chart.ecliptic, &real_framework);

        Ok(Chart {
            local_datetime: local_dt,
            utc_datetime: local_dt_utc,
            tz_name,
            julian_day: progressed_chart.julian_day,
            framework: real_framework,
            ecliptic: progressed_chart.ecliptic,
            mundane,
            right_ascension,
            cusps: progressed_chart.cusps,
            angles: progressed_chart.angles,
            place_name: progressed_chart.place_name,
        })
    }

    /// The transit-sensitive bundle (§4.7): the radix, its relocation to the
    /// query place, its active solar return (retried one calendar year
    /// earlier if the first hit lands in the future), both charts'
    /// secondary progressions to the query instant, and the transits chart
    /// itself.
    pub async fn transit_sensitive_bundle(
        &self,
        radix: &Chart,
        local_dt: OffsetDateTime,
        tz_name: String,
        geo_longitude: f64,
        geo_latitude: f64,
    ) -> AppResult<TransitSensitiveBundle> {
        let transits_instant = Instant::new(local_dt, local_dt.to_offset(UtcOffset::UTC));
        let transits = assembler::create_chart(
            self.ephemeris.as_ref(),
            transits_instant,
            tz_name.clone(),
            geo_longitude,
            geo_latitude,
            None,
        )
        .await?;

        let (local_natal, mut ssr_hits) = self
            .search_return_charts(
                radix,
                BodyId::Sun,
                1,
                transits_instant,
                geo_longitude,
                geo_latitude,
                &tz_name,
                1,
            )
            .await?;
        let mut active_ssr = ssr_hits
            .pop()
            .ok_or_else(|| AppError::Internal("solar return search produced no result".to_string()))?;

        if active_ssr.local_datetime > local_dt {
            let retry_local = local_dt
                .replace_year(local_dt.year() - 1)
                .map_err(|error| AppError::Internal(format!("cannot step back one year: {error}")))?;
            let retry_anchor = Instant::new(retry_local, retry_local.to_offset(UtcOffset::UTC));
            let (_, mut retry_hits) = self
                .search_return_charts(
                    radix,
                    BodyId::Sun,
                    1,
                    retry_anchor,
                    geo_longitude,
                    geo_latitude,
                    &tz_name,
                    1,
                )
                .await?;
            active_ssr = retry_hits
                .pop()
                .ok_or_else(|| AppError::Internal("solar return retry search produced no result".to_string()))?;
        }

        let sp_radix = self
            .progressions(radix, local_dt, tz_name.clone(), geo_longitude, geo_latitude)
            .await?;
        let sp_ssr = self
            .progressions(&active_ssr, local_dt, tz_name.clone(), geo_longitude, geo_latitude)
            .await?;

        Ok(TransitSensitiveBundle {
            radix: radix.clone(),
            local_natal,
            sp_radix,
            ssr: active_ssr,
            sp_ssr,
            transits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixtureEphemeris;

    fn service() -> ChartService {
        ChartService::new(Arc::new(FixtureEphemeris::hackensack()))
    }

    #[tokio::test]
    async fn create_chart_delegates_to_assembler() {
        let service = service();
        let ephemeris = FixtureEphemeris::hackensack();
        let instant = ephemeris.hackensack_instant();
        let chart = service
            .create_chart(instant, "America/New_York".to_string(), -74.1169, 40.9792, None)
            .await
            .expect("chart");
        assert!((chart.ecliptic_longitude(BodyId::Sun) - 333.196).abs() < 0.01);
    }

    #[tokio::test]
    async fn progressions_reuses_progressed_ecliptic_under_real_framework() {
        let service = service();
        let ephemeris = FixtureEphemeris::hackensack();
        let instant = ephemeris.hackensack_instant();
        let radix = service
            .create_chart(instant, "America/New_York".to_string(), -74.1169, 40.9792, None)
            .await
            .expect("radix");

        let later = instant.local + time::Duration::days(365);
        let progressed = service
            .progressions(&radix, later, "America/New_York".to_string(), -74.1169, 40.9792)
            .await
            .expect("progressed");

        // The fixture ephemeris is time-invariant, so the progressed chart's
        // ecliptic positions are identical to the radix's own.
        assert_eq!(
            progressed.ecliptic_longitude(BodyId::Sun),
            radix.ecliptic_longitude(BodyId::Sun)
        );
        assert_eq!(progressed.local_datetime, later);
    }
}
