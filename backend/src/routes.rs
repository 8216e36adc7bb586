//! Route table for the §6.2 API dispatcher.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/radix", post(handlers::radix))
        .route("/returns", post(handlers::returns))
        .route("/relocate", post(handlers::relocate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test]
    async fn health_reports_healthy() {
        let server = TestServer::new(build(AppState::new())).expect("server");
        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn radix_rejects_an_unknown_timezone() {
        let server = TestServer::new(build(AppState::new())).expect("server");
        let response = server
            .post("/radix")
            .json(&json!({
                "local_datetime": "2019-03-18T22:30:15",
                "longitude": -74.1169,
                "latitude": 40.9792,
                "tz": "Not/AZone",
            }))
            .await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert!(body["err"].as_str().is_some());
    }

    #[tokio::test]
    async fn radix_builds_a_hackensack_chart() {
        let server = TestServer::new(build(AppState::new())).expect("server");
        let response = server
            .post("/radix")
            .json(&json!({
                "local_datetime": "2019-03-18T22:30:15",
                "longitude": -74.1169,
                "latitude": 40.9792,
                "tz": "America/New_York",
            }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert!(body["ecliptical"]["Sun"].as_f64().is_some());
        assert!(body["cusps"]["4"].as_f64().is_some());
        assert_eq!(body["tz"], "America/New_York");
    }
}
