//! Geography data provider contract.

use async_trait::async_trait;

use crate::error::ApiError;
use vitrine_commerce::geo::{City, Country, Region};

/// The external geography data provider.
///
/// Lookups form a strict cascade: states are scoped to a country, cities
/// to a country + state pair (state codes are not globally unique).
#[async_trait]
pub trait GeoProvider: Send + Sync {
    /// List countries available for shipping.
    async fn countries(&self) -> Result<Vec<Country>, ApiError>;

    /// List states/regions for a country code.
    async fn states(&self, country: &str) -> Result<Vec<Region>, ApiError>;

    /// List cities for a country + state pair.
    async fn cities(&self, country: &str, state: &str) -> Result<Vec<City>, ApiError>;
}
