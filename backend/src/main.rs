//! # Sidereal Chart Backend
//!
//! The §6.2 API dispatcher: decodes `/radix`, `/returns` and `/relocate`
//! requests, calls into `chart-app`'s `ChartService`, and encodes responses
//! per the §6.3 Chart JSON schema. Owns no chart math of its own.

use anyhow::Result;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod dto;
mod error;
mod handlers;
mod middleware;
mod routes;
mod state;

use chart_infra::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "chart_backend=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("starting sidereal chart backend");

    let config = AppConfig::load().map_err(|error| anyhow::anyhow!("failed to load configuration: {error}"))?;

    let state = AppState::new();
    let app = routes::build(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::propagate_request_id_layer())
        .layer(middleware::logging_layer())
        .layer(middleware::request_id_layer());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_router_without_panicking() {
        let state = AppState::new();
        let _router = routes::build(state);
    }
}
