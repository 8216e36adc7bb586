//! Process-wide application state: the singleton [`chart_app::ChartService`]
//! (§4.6, §5 "Singleton service"), constructed once at startup and shared
//! across every request via `axum`'s `State` extractor.

use std::sync::Arc;

use chart_app::ChartService;
use chart_infra::AstroEphemerisProvider;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ChartService>,
}

impl AppState {
    pub fn new() -> Self {
        let ephemeris = Arc::new(AstroEphemerisProvider::new());
        Self {
            service: Arc::new(ChartService::new(ephemeris)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
