//! Domain-layer errors.
//!
//! All errors are serializable for structured logging and for surfacing as
//! the `{ "err": "<message>" }` response shape at the HTTP boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain layer errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum DomainError {
    #[error("Invalid Julian Day: {0}")]
    InvalidJulianDay(f64),

    #[error("Invalid coordinates provided")]
    InvalidCoordinates,

    #[error("Unknown celestial body code: {0}")]
    UnknownBodyCode(u8),

    #[error("Unknown celestial body name: {0}")]
    UnknownBodyName(String),

    #[error("Unparsable latitude/longitude: {0}")]
    UnparsableCoordinate(String),

    #[error("Harmonic {0} is outside the valid range [1, 36]")]
    HarmonicOutOfRange(u32),

    #[error("Harmonic must be an integer, got {0}")]
    NonIntegerHarmonic(f64),

    #[error("The Moon only supports harmonics up to 4, got {0}")]
    MoonHarmonicTooHigh(u32),

    #[error("Unknown search precision unit: {0}")]
    UnknownPrecisionUnit(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Validation failed: {field} - {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Domain operation failed: {0}")]
    OperationFailed(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        Self::OperationFailed(message.into())
    }

    /// True for the fatal, at-entry argument errors of §7 (unknown body,
    /// harmonic out of range, unparsable coordinate, precision unit unknown).
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownBodyCode(_)
                | Self::UnknownBodyName(_)
                | Self::UnparsableCoordinate(_)
                | Self::HarmonicOutOfRange(_)
                | Self::NonIntegerHarmonic(_)
                | Self::MoonHarmonicTooHigh(_)
                | Self::UnknownPrecisionUnit(_)
                | Self::UnknownTimezone(_)
        )
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationFailed { .. })
    }

    /// Error category for structured log fields.
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidJulianDay(_) | Self::InvalidCoordinates => "astronomical",

            Self::UnknownBodyCode(_)
            | Self::UnknownBodyName(_)
            | Self::UnparsableCoordinate(_)
            | Self::HarmonicOutOfRange(_)
            | Self::NonIntegerHarmonic(_)
            | Self::MoonHarmonicTooHigh(_)
            | Self::UnknownPrecisionUnit(_)
            | Self::UnknownTimezone(_) => "argument",

            Self::ValidationFailed { .. } => "validation",

            Self::OperationFailed(_) => "generic",
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_serialization_round_trips() {
        let error = DomainError::InvalidJulianDay(123.45);
        let json = serde_json::to_string(&error).expect("serialize");
        let deserialized: DomainError = serde_json::from_str(&json).expect("deserialize");
        assert!(matches!(deserialized, DomainError::InvalidJulianDay(v) if (v - 123.45).abs() < f64::EPSILON));
    }

    #[test]
    fn argument_errors_are_categorized() {
        assert!(DomainError::HarmonicOutOfRange(40).is_argument_error());
        assert_eq!(DomainError::HarmonicOutOfRange(40).category(), "argument");
        assert!(!DomainError::InvalidJulianDay(0.0).is_argument_error());
    }

    #[test]
    fn validation_helper_builds_validation_failed() {
        let error = DomainError::validation("harmonic", "must be positive");
        assert!(error.is_validation_error());
        assert_eq!(error.category(), "validation");
    }
}
