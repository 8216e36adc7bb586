//! The ten named chart angles and the twelve Campanus cusps.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The ten angles a chart carries: three sourced directly from the houses
/// call (`Asc`, `MC`, `Eq Asc`) and seven derived in-component from them
/// (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Angles {
    pub asc: f64,
    pub mc: f64,
    pub dsc: f64,
    pub ic: f64,
    pub eq_asc: f64,
    pub eq_dsc: f64,
    pub ep: f64,
    pub zen: f64,
    pub wp: f64,
    pub ndr: f64,
}

impl Angles {
    /// Builds the full angle set from the three ephemeris-sourced angles,
    /// deriving the remaining seven via [`crate::math::derive_angles`].
    pub fn from_sourced(asc: f64, mc: f64, eq_asc: f64) -> Self {
        let derived = crate::math::derive_angles(asc, mc, eq_asc);
        Self {
            asc,
            mc,
            dsc: derived.dsc,
            ic: derived.ic,
            eq_asc,
            eq_dsc: derived.eq_dsc,
            ep: derived.ep,
            zen: derived.zen,
            wp: derived.wp,
            ndr: derived.ndr,
        }
    }
}

impl Serialize for Angles {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(10))?;
        map.serialize_entry("Asc", &self.asc)?;
        map.serialize_entry("MC", &self.mc)?;
        map.serialize_entry("Dsc", &self.dsc)?;
        map.serialize_entry("IC", &self.ic)?;
        map.serialize_entry("Eq Asc", &self.eq_asc)?;
        map.serialize_entry("Eq Dsc", &self.eq_dsc)?;
        map.serialize_entry("EP", &self.ep)?;
        map.serialize_entry("Zen", &self.zen)?;
        map.serialize_entry("WP", &self.wp)?;
        map.serialize_entry("Ndr", &self.ndr)?;
        map.end()
    }
}

/// The twelve Campanus house cusps, 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cusps(pub [f64; 12]);

impl Cusps {
    #[inline]
    pub fn get(&self, house: u8) -> f64 {
        self.0[usize::from(house.clamp(1, 12) - 1)]
    }

    #[inline]
    pub fn set(&mut self, house: u8, value: f64) {
        self.0[usize::from(house.clamp(1, 12) - 1)] = value;
    }
}

impl Serialize for Cusps {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(12))?;
        for (index, value) in self.0.iter().enumerate() {
            let house = index + 1;
            map.serialize_entry(&house.to_string(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_angles_are_populated() {
        let angles = Angles::from_sourced(194.254, 112.426, 0.0);
        assert!((angles.dsc - 14.254).abs() < 1e-9);
        assert!((angles.ic - 292.426).abs() < 1e-9);
    }

    #[test]
    fn cusps_serialize_with_string_keys() {
        let mut cusps = Cusps::default();
        cusps.set(4, 292.426);
        let json = serde_json::to_value(cusps).expect("serialize");
        assert_eq!(json["4"], serde_json::json!(292.426));
    }
}
