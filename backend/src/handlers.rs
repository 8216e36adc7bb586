//! Request handlers for the three request types of §6.2: `/radix`,
//! `/returns`, `/relocate`. Each is a thin translation from wire DTO to a
//! `ChartService` call and back — no chart math lives in this crate.

use axum::extract::State;
use axum::Json;
use chart_app::ReturnParams;
use chart_domain::Instant;
use time::macros::format_description;
use time::PrimitiveDateTime;

use crate::dto::{ChartDto, RadixRequest, RelocateRequest, ReturnsRequest};
use crate::error::{BackendError, BackendResult};
use crate::state::AppState;

const CIVIL_DATETIME_FORMAT: &[time::format_description::FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// `POST /radix` — builds a single chart (§4.3).
pub async fn radix(
    State(state): State<AppState>,
    Json(request): Json<RadixRequest>,
) -> BackendResult<Json<ChartDto>> {
    let (local, utc) = request.resolve()?;
    let instant = Instant::new(local, utc);

    let chart = state
        .service
        .create_chart(
            instant,
            request.tz.clone(),
            request.longitude,
            request.latitude,
            request.place_name.clone(),
        )
        .await?;

    Ok(Json(ChartDto::from(&chart)))
}

/// `POST /returns` — harmonic return pairs (§4.5, §4.6).
pub async fn returns(
    State(state): State<AppState>,
    Json(request): Json<ReturnsRequest>,
) -> BackendResult<Json<Vec<ReturnPairDto>>> {
    let (radix_local, radix_utc) = request.radix.resolve()?;
    let radix_instant = Instant::new(radix_local, radix_utc);
    let radix = state
        .service
        .create_chart(
            radix_instant,
            request.radix.tz.clone(),
            request.radix.longitude,
            request.radix.latitude,
            request.radix.place_name.clone(),
        )
        .await?;

    let params = &request.return_params;
    let body = params.body_id()?;

    let anchor_naive = PrimitiveDateTime::parse(&params.return_start_date, CIVIL_DATETIME_FORMAT)
        .map_err(|error| BackendError::BadRequest(format!("unparsable return_start_date: {error}")))?;
    let anchor_local = chart_infra::timezone::resolve_civil(&params.tz, anchor_naive)?;
    let anchor_utc = anchor_local.to_offset(time::UtcOffset::UTC);
    let anchor = Instant::new(anchor_local, anchor_utc);

    let return_params = ReturnParams {
        body,
        harmonic: params.return_harmonic,
        anchor,
        geo_longitude: params.return_longitude,
        geo_latitude: params.return_latitude,
        tz_name: params.tz.clone(),
        quantity: params.return_quantity,
        place_name: request.radix.place_name.clone(),
    };

    let pairs = state.service.generate_return_pairs(&radix, return_params).await?;

    Ok(Json(
        pairs
            .iter()
            .map(|(radix, return_chart)| ReturnPairDto {
                radix: ChartDto::from(radix),
                return_chart: ChartDto::from(return_chart),
            })
            .collect(),
    ))
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ReturnPairDto {
    pub radix: ChartDto,
    pub return_chart: ChartDto,
}

/// `POST /relocate` — rebuilds a previously-returned chart's place-dependent
/// quantities against a new location/timezone (§4.4), and optionally
/// precesses a paired return chart into the relocated radix's framework.
pub async fn relocate(
    State(state): State<AppState>,
    Json(request): Json<RelocateRequest>,
) -> BackendResult<Json<RelocateResponseDto>> {
    let radix = request.radix.into_chart()?;
    let new_offset = chart_infra::timezone::offset_at(&request.tz, radix.utc_datetime)?;

    let relocated_radix = state
        .service
        .relocate(&radix, request.tz.clone(), new_offset, request.longitude, request.latitude)
        .await?;

    let relocated_return_chart = match request.return_chart {
        Some(dto) => {
            let return_chart = dto.into_chart()?;
            Some(ChartDto::from(&chart_app::transformer::precess(
                &return_chart,
                &relocated_radix,
            )))
        }
        None => None,
    };

    Ok(Json(RelocateResponseDto {
        radix: ChartDto::from(&relocated_radix),
        return_chart: relocated_return_chart,
    }))
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RelocateResponseDto {
    pub radix: ChartDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_chart: Option<ChartDto>,
}

/// `GET /health` — process liveness, no ephemeris call (§5 has no health
/// concept of its own; this is the ambient stack every teacher service
/// carries).
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "chart-backend",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
