//! Application layer errors.

use chart_domain::DomainError;

/// Application layer result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application layer errors — wraps [`DomainError`] plus the two failure
/// kinds §7 assigns above the domain layer: search failures from the
/// harmonic return solver, and configuration/wiring failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// §7 "search failures": a return window produced no result.
    #[error("Failed to find a return between {window_start} and {window_end}")]
    SearchFailed {
        window_start: String,
        window_end: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn category(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.category(),
            Self::SearchFailed { .. } => "search",
            Self::Configuration(_) => "configuration",
            Self::Internal(_) => "internal",
        }
    }
}
