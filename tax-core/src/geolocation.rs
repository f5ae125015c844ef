//! Mapping a detected location onto the state table.
//!
//! Detection itself is I/O and lives behind [`Geolocator`]; the engines
//! never call it. Implementations fetch a country code and region from
//! wherever they like and hand them to [`resolve_location`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::tables::TaxTables;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub state_name: String,
    pub state_abbreviation: String,
    pub city: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("detected location is outside the United States ({0}); ask the user which state they live in")]
    OutsideUnitedStates(String),

    #[error("could not map region '{0}' to a U.S. state; ask the user which state they live in")]
    UnmappedRegion(String),

    #[error("location lookup failed: {0}; ask the user which state they live in")]
    Request(String),
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Location, GeolocationError>;
}

/// Resolves a detected region, given as a full state name or a USPS code,
/// to a state table entry.
///
/// # Errors
///
/// [`GeolocationError::OutsideUnitedStates`] for any country other than
/// `US`, [`GeolocationError::UnmappedRegion`] when the region is not in the
/// state table.
pub fn resolve_location(
    tables: &TaxTables,
    country_code: &str,
    region: &str,
    city: &str,
) -> Result<Location, GeolocationError> {
    if !country_code.trim().eq_ignore_ascii_case("US") {
        return Err(GeolocationError::OutsideUnitedStates(country_code.trim().to_string()));
    }

    let state = tables
        .state_by_name(region)
        .or_else(|| tables.state(region))
        .ok_or_else(|| GeolocationError::UnmappedRegion(region.trim().to_string()))?;

    debug!(state = state.abbreviation, city, "location resolved");

    Ok(Location {
        state_name: state.name.to_string(),
        state_abbreviation: state.abbreviation.to_string(),
        city: city.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn resolve(
        country_code: &str,
        region: &str,
    ) -> Result<Location, GeolocationError> {
        resolve_location(TaxTables::current(), country_code, region, "Springfield")
    }

    #[test]
    fn resolves_full_state_name() {
        let location = resolve("US", "Illinois").unwrap();

        assert_eq!(
            location,
            Location {
                state_name: "Illinois".to_string(),
                state_abbreviation: "IL".to_string(),
                city: "Springfield".to_string(),
            }
        );
    }

    #[test]
    fn resolves_usps_code() {
        assert_eq!(resolve("us", "or").unwrap().state_name, "Oregon");
    }

    #[test]
    fn resolves_district_of_columbia() {
        assert_eq!(resolve("US", "District of Columbia").unwrap().state_abbreviation, "DC");
    }

    #[test]
    fn foreign_country_is_rejected() {
        let err = resolve("CA", "Ontario").unwrap_err();

        assert_eq!(err, GeolocationError::OutsideUnitedStates("CA".to_string()));
        assert!(err.to_string().contains("ask the user"));
    }

    #[test]
    fn unknown_region_is_rejected() {
        let err = resolve("US", "Puerto Rico").unwrap_err();

        assert_eq!(err, GeolocationError::UnmappedRegion("Puerto Rico".to_string()));
    }

    struct FixedGeolocator(Result<Location, GeolocationError>);

    #[async_trait]
    impl Geolocator for FixedGeolocator {
        async fn locate(&self) -> Result<Location, GeolocationError> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn geolocator_is_object_safe() {
        let located: Box<dyn Geolocator> =
            Box::new(FixedGeolocator(resolve_location(TaxTables::current(), "US", "Texas", "Austin")));

        let location = located.locate().await.unwrap();

        assert_eq!(location.state_abbreviation, "TX");
        assert_eq!(location.city, "Austin");
    }

    #[tokio::test]
    async fn geolocator_failure_propagates() {
        let failing: Box<dyn Geolocator> =
            Box::new(FixedGeolocator(Err(GeolocationError::Request("timed out".to_string()))));

        let err = failing.locate().await.unwrap_err();

        assert!(err.to_string().contains("timed out"));
    }
}
