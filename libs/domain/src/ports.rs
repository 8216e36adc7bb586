//! Port interfaces for external collaborators.
//!
//! Defines the contracts infrastructure adapters must implement. These
//! belong to the domain layer in Clean Architecture so that both the
//! application layer (which consumes them) and the infrastructure layer
//! (which implements them) depend on a single, stable boundary.

use async_trait::async_trait;

use crate::body::BodyId;
use crate::errors::DomainError;

/// Domain-wide result type for ports.
pub type PortResult<T> = Result<T, DomainError>;

/// Raw ecliptic output from a single `calc_ut`-style call: the six scalars
/// the ephemeris backend writes (longitude, latitude, distance and their
/// three rates of change).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawEclipticOutput {
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub d_longitude_dt: f64,
    pub d_latitude_dt: f64,
    pub d_distance_dt: f64,
}

/// The three angles and twelve cusps a Campanus houses call produces.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HousesOutput {
    pub asc: f64,
    pub mc: f64,
    pub eq_asc: f64,
    pub cusps: [f64; 12],
}

/// Thin, deterministic wrapper over the underlying ephemeris library (§6.1).
/// Every method is `&self` (never `&mut self`): the adapter's shared mutable
/// state, if any, is its own concern, serialized behind its own interior
/// mutability rather than exposed through `&mut` borrows here — this is what
/// lets `ChartService` hold a single `Arc<dyn EphemerisProvider>` and call it
/// from any number of logical call sites without a borrow-checker fight.
#[async_trait]
pub trait EphemerisProvider: Send + Sync {
    /// `julian_day(y, m, d, hour_fraction, gregorian_flag=1)`.
    async fn julian_day(&self, year: i32, month: u8, day: u8, hour_fraction: f64) -> PortResult<f64>;

    /// `calc_ut(jd, body_id, flags, out[6], err)` for one of the ten bodies.
    async fn calc_body(&self, jd: f64, body: BodyId) -> PortResult<RawEclipticOutput>;

    /// `calc_ut(jd, -1, flags, out[6], err)`; only `out[0]` (obliquity) matters.
    async fn obliquity(&self, jd: f64) -> PortResult<f64>;

    /// `ayanamsa_ut(jd, flags, &out, err)`; returns the raw ayanamsa, not
    /// `30 - ayanamsa` (SVP derivation is the framework builder's job).
    async fn ayanamsa(&self, jd: f64) -> PortResult<f64>;

    /// `houses(jd, flags, lat, lon, 'C', cusps[13], points[10])`. `ramc` is
    /// the framework's own right ascension of the midheaven (`lst * 15`,
    /// §4.1), passed in rather than re-derived from `jd`, so the cusps this
    /// call returns share a sidereal-time origin with the body mundane
    /// positions the same framework projects.
    async fn houses(&self, jd: f64, ramc: f64, geo_latitude: f64) -> PortResult<HousesOutput>;
}

/// A resolved place: coordinates plus an IANA timezone name. `C8`'s Radix
/// request already carries `(longitude, latitude, tz)` explicitly, so no
/// concrete resolver ships with this core; this port exists for a caller
/// that wants to accept a free-text place name instead.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub longitude: f64,
    pub latitude: f64,
    pub tz_name: String,
}

/// Geocoding/timezone-lookup collaborator, explicitly out of core scope
/// (§1) but declared here as a trait boundary for callers that need it.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> PortResult<ResolvedLocation>;
}
