//! # Chart Infrastructure Layer
//!
//! The one crate allowed to depend on a concrete ephemeris library: the
//! production [`chart_domain::EphemerisProvider`] adapter (backed by the
//! `astro` crate's VSOP87/ELP-2000 routines), IANA timezone resolution, and
//! configuration loading. Depends on `chart-domain` and `chart-app`,
//! mirroring the teacher's own infra → app → domain dependency direction.

pub mod config;
pub mod ephemeris;
pub mod houses;
pub mod mocks;
pub mod timezone;

pub use config::AppConfig;
pub use ephemeris::AstroEphemerisProvider;
pub use mocks::StaticLocationResolver;

/// Infrastructure layer errors: everything this crate's adapters can fail
/// with, distinct from [`chart_domain::DomainError`] (the core's own
/// vocabulary) so a caller can tell "the ephemeris math rejected this input"
/// from "the adapter couldn't reach its backing data."
#[derive(Debug, thiserror::Error)]
pub enum InfraError {
    #[error("Unknown IANA timezone: {0}")]
    UnknownTimezone(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Ephemeris computation error: {0}")]
    Ephemeris(String),
}

/// Converts an infrastructure error into the domain's own error vocabulary,
/// the boundary every `EphemerisProvider` method crosses on the way back
/// into `chart-app`.
impl From<InfraError> for chart_domain::DomainError {
    fn from(error: InfraError) -> Self {
        match error {
            InfraError::UnknownTimezone(name) => chart_domain::DomainError::UnknownTimezone(name),
            InfraError::Configuration(message) | InfraError::Ephemeris(message) => {
                chart_domain::DomainError::operation_failed(message)
            }
        }
    }
}
