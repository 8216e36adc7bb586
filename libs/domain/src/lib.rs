//! # Chart Domain Layer
//!
//! Pure types and pure math for sidereal chart computation: Julian Day,
//! `SiderealFramework`, the Campanus/right-ascension trig kernel, harmonic
//! arithmetic, and the `Chart` value itself. No I/O, no async work, no
//! dependency on any infrastructure crate — this is the part of the system
//! that a unit test can exercise without ever talking to an ephemeris
//! backend.

pub mod angle;
pub mod angles;
pub mod body;
pub mod body_map;
pub mod chart;
pub mod ecliptic;
pub mod errors;
pub mod framework;
pub mod harmonic;
pub mod instant;
pub mod julian_day;
pub mod math;
pub mod ports;

pub use angle::{normalize_degrees, Angle};
pub use angles::{Angles, Cusps};
pub use body::BodyId;
pub use body_map::BodyMap;
pub use chart::{Chart, MundanePosition};
pub use ecliptic::EclipticCoords;
pub use errors::{DomainError, DomainResult};
pub use framework::SiderealFramework;
pub use instant::Instant;
pub use julian_day::JulianDay;
pub use ports::{EphemerisProvider, HousesOutput, LocationResolver, PortResult, RawEclipticOutput, ResolvedLocation};
