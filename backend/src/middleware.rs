//! Request-scoped logging middleware: a generated request ID propagated onto
//! every log line, plus `tower_http`'s own span-per-request tracing — the
//! same ambient observability stack the teacher's backend carries.

use axum::http::{HeaderName, Request};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates a fresh UUIDv4 for every request that doesn't already carry a
/// request ID header.
#[derive(Clone, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let header_value = Uuid::new_v4().to_string().parse().ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Sets `x-request-id` on the request (if absent) and propagates it onto the
/// response.
pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER), MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER))
}

/// Per-request tracing span covering method, URI, status and latency.
pub fn logging_layer(
) -> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}
