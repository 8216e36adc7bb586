//! Wire-format request/response shapes (§6.2, §6.3).
//!
//! The domain `Chart` is the system's real value type; nothing here lives
//! inside `chart-domain` or `chart-app` because the wire contract (field
//! names, which scalars are exposed per body, how a civil datetime without
//! an offset is spelled) is this crate's own concern, not the core's.

use std::collections::HashMap;

use chart_domain::{BodyId, Chart, MundanePosition};
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::{BackendError, BackendResult};

const CIVIL_DATETIME_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// A `/radix` request, and the shape `/returns`' nested `radix` field reuses
/// verbatim (§6.2).
#[derive(Debug, Clone, Deserialize)]
pub struct RadixRequest {
    pub local_datetime: String,
    pub longitude: f64,
    pub latitude: f64,
    pub tz: String,
    #[serde(default)]
    pub place_name: Option<String>,
}

impl RadixRequest {
    /// Resolves the request's civil datetime string against its IANA `tz`
    /// name into a `(local, utc)` pair.
    pub fn resolve(&self) -> BackendResult<(OffsetDateTime, OffsetDateTime)> {
        let naive = PrimitiveDateTime::parse(&self.local_datetime, CIVIL_DATETIME_FORMAT)
            .map_err(|error| BackendError::BadRequest(format!("unparsable local_datetime: {error}")))?;
        let local = chart_infra::timezone::resolve_civil(&self.tz, naive)?;
        Ok((local, local.to_offset(time::UtcOffset::UTC)))
    }
}

/// `/returns` request body (§6.2).
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnsRequest {
    pub radix: RadixRequest,
    pub return_params: ReturnParamsRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReturnParamsRequest {
    pub return_planet: String,
    pub return_harmonic: u32,
    pub return_longitude: f64,
    pub return_latitude: f64,
    pub return_start_date: String,
    pub tz: String,
    pub return_quantity: u32,
}

impl ReturnParamsRequest {
    pub fn body_id(&self) -> BackendResult<BodyId> {
        match self.return_planet.as_str() {
            "Sun" => Ok(BodyId::Sun),
            "Moon" => Ok(BodyId::Moon),
            other => Err(BackendError::BadRequest(format!(
                "return_planet must be \"Sun\" or \"Moon\", got {other:?}"
            ))),
        }
    }
}

/// `/relocate` request body (§6.2). `radix` and `return_chart` are
/// previously-returned [`ChartDto`] documents (§6.3), not fresh `/radix`
/// requests — relocation re-projects an already-computed chart, it does not
/// build one from scratch.
#[derive(Debug, Clone, Deserialize)]
pub struct RelocateRequest {
    pub longitude: f64,
    pub latitude: f64,
    pub tz: String,
    pub radix: ChartDto,
    #[serde(default)]
    pub return_chart: Option<ChartDto>,
}

/// The Chart JSON schema of §6.3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDto {
    pub ecliptical: HashMap<String, f64>,
    pub mundane: HashMap<String, f64>,
    pub right_ascension: HashMap<String, f64>,
    pub angles: HashMap<String, f64>,
    pub cusps: HashMap<String, f64>,
    pub local_datetime: String,
    pub utc_datetime: String,
    pub tz: String,
    pub julian_day: f64,
    pub lst: f64,
    pub ramc: f64,
    pub obliquity: f64,
    pub svp: f64,
    pub longitude: f64,
    pub latitude: f64,
    pub place_name: Option<String>,
}

impl From<&Chart> for ChartDto {
    fn from(chart: &Chart) -> Self {
        let ecliptical = BodyId::ALL
            .into_iter()
            .map(|body| (body.name().to_string(), chart.ecliptic.get(body).longitude))
            .collect();
        let mundane = BodyId::ALL
            .into_iter()
            .map(|body| (body.name().to_string(), chart.mundane.get(body).pvl))
            .collect();
        let right_ascension = BodyId::ALL
            .into_iter()
            .map(|body| (body.name().to_string(), *chart.right_ascension.get(body)))
            .collect();

        let a = &chart.angles;
        let angles = HashMap::from([
            ("Asc".to_string(), a.asc),
            ("MC".to_string(), a.mc),
            ("Dsc".to_string(), a.dsc),
            ("IC".to_string(), a.ic),
            ("Eq Asc".to_string(), a.eq_asc),
            ("Eq Dsc".to_string(), a.eq_dsc),
            ("EP".to_string(), a.ep),
            ("Zen".to_string(), a.zen),
            ("WP".to_string(), a.wp),
            ("Ndr".to_string(), a.ndr),
        ]);

        let cusps = (1..=12u8)
            .map(|house| (house.to_string(), chart.cusps.get(house)))
            .collect();

        Self {
            ecliptical,
            mundane,
            right_ascension,
            angles,
            cusps,
            local_datetime: format_offset(chart.local_datetime),
            utc_datetime: format_offset(chart.utc_datetime),
            tz: chart.tz_name.clone(),
            julian_day: chart.julian_day.as_f64(),
            lst: chart.framework.lst,
            ramc: chart.framework.ramc,
            obliquity: chart.framework.obliquity,
            svp: chart.framework.svp,
            longitude: chart.framework.geo_longitude,
            latitude: chart.framework.geo_latitude,
            place_name: chart.place_name.clone(),
        }
    }
}

impl ChartDto {
    /// Reconstructs the domain [`Chart`] this DTO was serialized from, for
    /// `/relocate`'s incoming `radix`/`return_chart` fields.
    ///
    /// §6.3 only exposes ecliptic *longitude* per body, not latitude — the
    /// one genuinely lossy step in this round-trip. Latitude is reconstructed
    /// as `0.0`, which is an accepted limitation of the stateless wire
    /// boundary (recorded in DESIGN.md), not a domain bug: `ChartService`'s
    /// own in-process calls (e.g. `generate_return_pairs`) never go through
    /// this DTO and never lose latitude.
    pub fn into_chart(self) -> BackendResult<Chart> {
        let local_datetime = OffsetDateTime::parse(&self.local_datetime, &time::format_description::well_known::Rfc3339)
            .map_err(|error| BackendError::BadRequest(format!("unparsable local_datetime: {error}")))?;
        let utc_datetime = OffsetDateTime::parse(&self.utc_datetime, &time::format_description::well_known::Rfc3339)
            .map_err(|error| BackendError::BadRequest(format!("unparsable utc_datetime: {error}")))?;
        let julian_day = chart_domain::JulianDay::new(self.julian_day)
            .map_err(|error| BackendError::BadRequest(error.to_string()))?;

        let mut ecliptic = chart_domain::BodyMap::default();
        let mut mundane = chart_domain::BodyMap::default();
        let mut right_ascension = chart_domain::BodyMap::default();
        for body in BodyId::ALL {
            let longitude = *self.ecliptical.get(body.name()).ok_or_else(|| {
                BackendError::BadRequest(format!("ecliptical missing body {}", body.name()))
            })?;
            ecliptic.set(
                body,
                chart_domain::EclipticCoords {
                    longitude,
                    ..chart_domain::EclipticCoords::ZERO
                },
            );

            let pvl = *self.mundane.get(body.name()).unwrap_or(&0.0);
            #[allow(clippy::as_conversions)]
            let house = (pvl / 30.0).floor() as u8 + 1;
            mundane.set(body, MundanePosition { house, pvl });

            right_ascension.set(body, *self.right_ascension.get(body.name()).unwrap_or(&0.0));
        }

        let angles = chart_domain::Angles {
            asc: *self.angles.get("Asc").unwrap_or(&0.0),
            mc: *self.angles.get("MC").unwrap_or(&0.0),
            dsc: *self.angles.get("Dsc").unwrap_or(&0.0),
            ic: *self.angles.get("IC").unwrap_or(&0.0),
            eq_asc: *self.angles.get("Eq Asc").unwrap_or(&0.0),
            eq_dsc: *self.angles.get("Eq Dsc").unwrap_or(&0.0),
            ep: *self.angles.get("EP").unwrap_or(&0.0),
            zen: *self.angles.get("Zen").unwrap_or(&0.0),
            wp: *self.angles.get("WP").unwrap_or(&0.0),
            ndr: *self.angles.get("Ndr").unwrap_or(&0.0),
        };

        let mut cusps = chart_domain::Cusps::default();
        for house in 1..=12u8 {
            cusps.set(house, *self.cusps.get(&house.to_string()).unwrap_or(&0.0));
        }

        let framework = chart_domain::SiderealFramework::new(
            self.longitude,
            self.latitude,
            self.lst,
            self.svp,
            self.obliquity,
        );

        Ok(Chart {
            local_datetime,
            utc_datetime,
            tz_name: self.tz,
            julian_day,
            framework,
            ecliptic,
            mundane,
            right_ascension,
            cusps,
            angles,
            place_name: self.place_name,
        })
    }
}

fn format_offset(value: OffsetDateTime) -> String {
    value
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_domain::{Angles, BodyMap, Cusps, EclipticCoords, SiderealFramework};
    use time::macros::datetime;

    fn sample_chart() -> Chart {
        let mut ecliptic = BodyMap::default();
        ecliptic.set(
            BodyId::Sun,
            EclipticCoords {
                longitude: 333.196,
                ..EclipticCoords::ZERO
            },
        );
        let framework = SiderealFramework::new(-74.1169, 40.9792, 9.325, 4.991, 23.436);
        let mundane = chart_app::projector::project_mundane(&ecliptic, &framework);
        let right_ascension = chart_app::projector::project_right_ascension(&ecliptic, &framework);

        Chart {
            local_datetime: datetime!(2019-03-18 22:30:15 -4),
            utc_datetime: datetime!(2019-03-19 02:30:15 UTC),
            tz_name: "America/New_York".to_string(),
            julian_day: chart_domain::JulianDay::new(2_458_561.1).expect("jd"),
            framework,
            ecliptic,
            mundane,
            right_ascension,
            cusps: Cusps::default(),
            angles: Angles::from_sourced(194.254, 112.426, 0.0),
            place_name: Some("Hackensack, NJ".to_string()),
        }
    }

    #[test]
    fn chart_dto_exposes_only_longitude_per_body() {
        let chart = sample_chart();
        let dto = ChartDto::from(&chart);
        assert!((dto.ecliptical["Sun"] - 333.196).abs() < 1e-9);
        assert_eq!(dto.angles["Asc"], 194.254);
        assert_eq!(dto.place_name.as_deref(), Some("Hackensack, NJ"));
    }

    #[test]
    fn round_trip_preserves_longitude_and_angles() {
        let chart = sample_chart();
        let dto = ChartDto::from(&chart);
        let reconstructed = dto.into_chart().expect("reconstructs");

        assert_eq!(
            reconstructed.ecliptic_longitude(BodyId::Sun),
            chart.ecliptic_longitude(BodyId::Sun)
        );
        assert_eq!(reconstructed.angles.asc, chart.angles.asc);
        assert_eq!(reconstructed.utc_datetime, chart.utc_datetime);
        // Latitude is not carried on the wire (§6.3); the reconstruction is
        // a documented, lossy round-trip on that one field only.
        assert_eq!(reconstructed.ecliptic.get(BodyId::Sun).latitude, 0.0);
    }
}
