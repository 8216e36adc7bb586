//! Maps [`chart_app::AppError`] (and this crate's own request-parsing
//! failures) onto the `{ "err": "<message>" }` response shape of §6.2,
//! logging the underlying error at `warn!` first — the same
//! `InfraError`-to-`DomainError` conversion discipline `chart-infra`
//! applies one layer down.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

/// Errors this crate's handlers can produce: an [`chart_app::AppError`] from
/// the service layer, a malformed request body, or an unresolvable
/// timezone/place name encountered while translating a request DTO.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    App(#[from] chart_app::AppError),

    #[error("{0}")]
    BadRequest(String),
}

impl From<chart_infra::InfraError> for BackendError {
    fn from(error: chart_infra::InfraError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::App(error) => match error.category() {
                "argument" | "validation" => StatusCode::BAD_REQUEST,
                "search" => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        warn!(error = %self, %status, "request failed");
        (status, Json(json!({ "err": self.to_string() }))).into_response()
    }
}

pub type BackendResult<T> = Result<T, BackendError>;
