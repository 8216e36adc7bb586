//! Test doubles for ports this crate does not ship a production adapter for.
//!
//! [`chart_domain::LocationResolver`] has no production implementation in
//! this core (§1: geocoding is out of scope) — callers that need to accept a
//! free-text place name bring their own resolver, or use this fixed-table
//! stand-in in integration tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chart_domain::{DomainError, LocationResolver, PortResult, ResolvedLocation};

/// Resolves a small, fixed table of place names to coordinates and IANA
/// timezones. Exact-match, case-sensitive lookup — no fuzzy matching, no
/// external geocoding service.
#[derive(Debug, Clone, Default)]
pub struct StaticLocationResolver {
    places: HashMap<String, ResolvedLocation>,
}

impl StaticLocationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a place name, returning `self` for chained construction.
    #[must_use]
    pub fn with_place(mut self, name: impl Into<String>, location: ResolvedLocation) -> Self {
        self.places.insert(name.into(), location);
        self
    }
}

#[async_trait]
impl LocationResolver for StaticLocationResolver {
    async fn resolve(&self, query: &str) -> PortResult<ResolvedLocation> {
        self.places
            .get(query)
            .cloned()
            .ok_or_else(|| DomainError::operation_failed(format!("unknown place: {query}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn resolves_a_registered_place() {
        let resolver = StaticLocationResolver::new().with_place(
            "Hackensack, NJ",
            ResolvedLocation {
                longitude: -74.1169,
                latitude: 40.9792,
                tz_name: "America/New_York".to_string(),
            },
        );

        let resolved = resolver.resolve("Hackensack, NJ").await.expect("resolves");
        assert!((resolved.longitude - (-74.1169)).abs() < 1e-9);
        assert_eq!(resolved.tz_name, "America/New_York");
    }

    #[tokio::test]
    async fn rejects_an_unregistered_place() {
        let resolver = StaticLocationResolver::new();
        assert!(resolver.resolve("Nowhere").await.is_err());
    }
}
