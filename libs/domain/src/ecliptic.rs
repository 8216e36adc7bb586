//! Per-body ecliptic coordinates, as written by the ephemeris provider.

use serde::{Deserialize, Serialize};

/// Six scalars per body. Only `longitude`/`latitude` drive downstream math;
/// the remaining four (distance and its three rates of change) are preserved
/// purely for observers that want the raw ephemeris output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EclipticCoords {
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub d_longitude_dt: f64,
    pub d_latitude_dt: f64,
    pub d_distance_dt: f64,
}

impl EclipticCoords {
    pub const ZERO: Self = Self {
        longitude: 0.0,
        latitude: 0.0,
        distance: 0.0,
        d_longitude_dt: 0.0,
        d_latitude_dt: 0.0,
        d_distance_dt: 0.0,
    };
}
