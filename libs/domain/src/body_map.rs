//! `BodyMap<T>` — a fixed-size, `BodyId`-indexed array standing in for the
//! per-chart coordinate maps (ecliptic, mundane, right ascension).
//!
//! The design note behind this type: the legacy implementation freshly
//! allocated a dict per chart, but an earlier draft aliased a module-level
//! dict shared across charts. A fixed-size array indexed by `BodyId` makes
//! sharing structurally impossible and iteration order definitional (always
//! `BodyId::ALL` order), while still serializing as a `{BodyName: value}`
//! JSON object at the wire boundary.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::body::BodyId;

/// A value for every one of the ten bodies, indexed by `BodyId`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMap<T>(pub [T; 10]);

impl<T: Default + Copy> Default for BodyMap<T> {
    fn default() -> Self {
        Self([T::default(); 10])
    }
}

impl<T> BodyMap<T> {
    #[inline]
    pub fn get(&self, body: BodyId) -> &T {
        &self.0[usize::from(body.code())]
    }

    #[inline]
    pub fn get_mut(&mut self, body: BodyId) -> &mut T {
        &mut self.0[usize::from(body.code())]
    }

    #[inline]
    pub fn set(&mut self, body: BodyId, value: T) {
        self.0[usize::from(body.code())] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &T)> {
        BodyId::ALL.into_iter().map(move |b| (b, self.get(b)))
    }
}

impl<T: Serialize> Serialize for BodyMap<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(10))?;
        for (body, value) in self.iter() {
            map.serialize_entry(body.name(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_order_is_body_id_order() {
        let mut map: BodyMap<f64> = BodyMap::default();
        map.set(BodyId::Sun, 1.0);
        map.set(BodyId::Moon, 2.0);
        let order: Vec<_> = map.iter().map(|(b, _)| b).collect();
        assert_eq!(order, BodyId::ALL.to_vec());
    }

    #[test]
    fn serializes_as_name_keyed_object() {
        let mut map: BodyMap<f64> = BodyMap::default();
        map.set(BodyId::Sun, 333.196);
        let json = serde_json::to_value(&map).expect("serialize");
        assert_eq!(json["Sun"], serde_json::json!(333.196));
    }
}
