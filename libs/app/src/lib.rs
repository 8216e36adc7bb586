//! # Chart Application Layer
//!
//! Orchestrates the domain layer's pure types and math against an
//! [`chart_domain::EphemerisProvider`] to build, relocate, precess and
//! search sidereal charts (C2–C7 of the design). No concrete ephemeris
//! adapter lives here — only the trait boundary (defined in `chart-domain`)
//! and the pure-orchestration logic that drives it.

pub mod assembler;
pub mod errors;
pub mod framework;
pub mod harmonic;
pub mod projector;
pub mod service;
pub mod transformer;

pub use errors::{AppError, AppResult};
pub use harmonic::Precision;
pub use service::{ChartService, ReturnParams, TransitSensitiveBundle};

#[cfg(test)]
pub(crate) mod test_support;
