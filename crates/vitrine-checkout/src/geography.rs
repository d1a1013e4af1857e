//! Cascading country / state / city resolution.
//!
//! Selections form a strict hierarchy: changing a country clears the
//! state and city; changing a state clears the city. Every option fetch
//! is stamped with the resolver's generation counter at issue time, and
//! a batch is applied only while its stamp still matches - a slow
//! response for a superseded selection is discarded, never merged.

use std::sync::Arc;

use tracing::{debug, warn};

use vitrine_commerce::geo::{City, Country, Region};
use vitrine_data::GeoProvider;

/// The current country / state / city selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeographySelection {
    /// Selected country code.
    pub country: Option<String>,
    /// Selected state/region code.
    pub state: Option<String>,
    /// Selected city name.
    pub city: Option<String>,
}

/// A state listing stamped with the generation it was issued under.
#[derive(Debug)]
pub struct RegionBatch {
    generation: u64,
    /// The fetched regions (empty when the fetch degraded).
    pub regions: Vec<Region>,
}

/// A city listing stamped with the generation it was issued under.
#[derive(Debug)]
pub struct CityBatch {
    generation: u64,
    /// The fetched cities (empty when the fetch degraded).
    pub cities: Vec<City>,
}

/// An in-flight state lookup, detached from the resolver.
///
/// Holding the request by value lets the shell run it concurrently with
/// further selection changes; the stamped generation decides at apply
/// time whether the response is still current.
pub struct StatesRequest<P> {
    provider: Arc<P>,
    country: Option<String>,
    generation: u64,
}

impl<P: GeoProvider> StatesRequest<P> {
    /// Run the lookup. Fetch errors degrade to an empty listing.
    pub async fn fetch(self) -> RegionBatch {
        let regions = match &self.country {
            Some(country) => match self.provider.states(country).await {
                Ok(regions) => regions,
                Err(e) => {
                    warn!(country = %country, error = %e, "state lookup failed, degrading to empty set");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        RegionBatch {
            generation: self.generation,
            regions,
        }
    }
}

/// An in-flight city lookup, detached from the resolver.
pub struct CitiesRequest<P> {
    provider: Arc<P>,
    country: Option<String>,
    state: Option<String>,
    generation: u64,
}

impl<P: GeoProvider> CitiesRequest<P> {
    /// Run the lookup. Fetch errors degrade to an empty listing.
    pub async fn fetch(self) -> CityBatch {
        let cities = match (&self.country, &self.state) {
            (Some(country), Some(state)) => match self.provider.cities(country, state).await {
                Ok(cities) => cities,
                Err(e) => {
                    warn!(country = %country, state = %state, error = %e, "city lookup failed, degrading to empty set");
                    Vec::new()
                }
            },
            _ => Vec::new(),
        };
        CityBatch {
            generation: self.generation,
            cities,
        }
    }
}

/// Cascading geography resolver.
pub struct GeographyResolver<P> {
    provider: Arc<P>,
    generation: u64,
    selection: GeographySelection,
    countries: Vec<Country>,
    states: Vec<Region>,
    cities: Vec<City>,
}

impl<P: GeoProvider> GeographyResolver<P> {
    /// Create a resolver over a geography provider.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            generation: 0,
            selection: GeographySelection::default(),
            countries: Vec::new(),
            states: Vec::new(),
            cities: Vec::new(),
        }
    }

    /// The current generation token.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current selection.
    pub fn selection(&self) -> &GeographySelection {
        &self.selection
    }

    /// Loaded country options.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Loaded state options for the selected country.
    pub fn states(&self) -> &[Region] {
        &self.states
    }

    /// Loaded city options for the selected state.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Load the country list. Fetch errors degrade to an empty set.
    pub async fn load_countries(&mut self) {
        match self.provider.countries().await {
            Ok(countries) => self.countries = countries,
            Err(e) => {
                warn!(error = %e, "country lookup failed, degrading to empty set");
                self.countries = Vec::new();
            }
        }
    }

    /// Select a country, clearing the state and city levels.
    ///
    /// Bumps the generation so any in-flight state or city lookup for
    /// the previous selection is discarded at apply time.
    pub fn select_country(&mut self, code: impl Into<String>) {
        self.generation += 1;
        self.selection.country = Some(code.into());
        self.selection.state = None;
        self.selection.city = None;
        self.states.clear();
        self.cities.clear();
    }

    /// Select a state within the current country, clearing the city level.
    pub fn select_state(&mut self, code: impl Into<String>) {
        self.generation += 1;
        self.selection.state = Some(code.into());
        self.selection.city = None;
        self.cities.clear();
    }

    /// Select a city within the current state.
    pub fn select_city(&mut self, name: impl Into<String>) {
        self.selection.city = Some(name.into());
    }

    /// Issue a state lookup for the current selection.
    pub fn request_states(&self) -> StatesRequest<P> {
        StatesRequest {
            provider: Arc::clone(&self.provider),
            country: self.selection.country.clone(),
            generation: self.generation,
        }
    }

    /// Issue a city lookup for the current selection.
    pub fn request_cities(&self) -> CitiesRequest<P> {
        CitiesRequest {
            provider: Arc::clone(&self.provider),
            country: self.selection.country.clone(),
            state: self.selection.state.clone(),
            generation: self.generation,
        }
    }

    /// Apply a fetched state listing.
    ///
    /// Returns false (and changes nothing) when the batch was issued
    /// under a superseded generation.
    pub fn apply_states(&mut self, batch: RegionBatch) -> bool {
        if batch.generation != self.generation {
            debug!(
                batch_generation = batch.generation,
                current_generation = self.generation,
                "discarding stale state listing"
            );
            return false;
        }
        self.states = batch.regions;
        true
    }

    /// Apply a fetched city listing.
    pub fn apply_cities(&mut self, batch: CityBatch) -> bool {
        if batch.generation != self.generation {
            debug!(
                batch_generation = batch.generation,
                current_generation = self.generation,
                "discarding stale city listing"
            );
            return false;
        }
        self.cities = batch.cities;
        true
    }

    /// Invalidate every pending lookup (navigation away from checkout).
    ///
    /// Late responses become inert no-ops.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use vitrine_data::ApiError;

    struct FakeGeo;

    #[async_trait]
    impl GeoProvider for FakeGeo {
        async fn countries(&self) -> Result<Vec<Country>, ApiError> {
            Ok(vec![
                Country::new("FR", "France"),
                Country::new("DE", "Germany"),
            ])
        }

        async fn states(&self, country: &str) -> Result<Vec<Region>, ApiError> {
            match country {
                "FR" => Ok(vec![Region::new("IDF", "\u{ce}le-de-France")]),
                "DE" => Ok(vec![Region::new("BY", "Bavaria")]),
                _ => Ok(Vec::new()),
            }
        }

        async fn cities(&self, _country: &str, state: &str) -> Result<Vec<City>, ApiError> {
            match state {
                "IDF" => Ok(vec![City::new("Paris")]),
                "BY" => Ok(vec![City::new("Munich")]),
                _ => Ok(Vec::new()),
            }
        }
    }

    struct FailingGeo;

    #[async_trait]
    impl GeoProvider for FailingGeo {
        async fn countries(&self) -> Result<Vec<Country>, ApiError> {
            Err(ApiError::Timeout)
        }

        async fn states(&self, _country: &str) -> Result<Vec<Region>, ApiError> {
            Err(ApiError::Timeout)
        }

        async fn cities(&self, _country: &str, _state: &str) -> Result<Vec<City>, ApiError> {
            Err(ApiError::Timeout)
        }
    }

    #[tokio::test]
    async fn test_cascade_select_and_apply() {
        let mut resolver = GeographyResolver::new(Arc::new(FakeGeo));
        resolver.load_countries().await;
        assert_eq!(resolver.countries().len(), 2);

        resolver.select_country("FR");
        let batch = resolver.request_states().fetch().await;
        assert!(resolver.apply_states(batch));
        assert_eq!(resolver.states()[0].code, "IDF");

        resolver.select_state("IDF");
        let batch = resolver.request_cities().fetch().await;
        assert!(resolver.apply_cities(batch));
        assert_eq!(resolver.cities()[0].name, "Paris");
    }

    #[tokio::test]
    async fn test_country_change_discards_pending_states() {
        let mut resolver = GeographyResolver::new(Arc::new(FakeGeo));

        // Issue the lookup for FR, then switch to DE before it applies.
        resolver.select_country("FR");
        let fr_request = resolver.request_states();

        resolver.select_country("DE");
        let de_request = resolver.request_states();

        let fr_batch = fr_request.fetch().await;
        let de_batch = de_request.fetch().await;

        // The response order doesn't matter: only DE's listing lands.
        assert!(!resolver.apply_states(fr_batch));
        assert!(resolver.apply_states(de_batch));
        assert_eq!(resolver.states()[0].code, "BY");
    }

    #[tokio::test]
    async fn test_country_change_clears_lower_levels() {
        let mut resolver = GeographyResolver::new(Arc::new(FakeGeo));

        resolver.select_country("FR");
        let batch = resolver.request_states().fetch().await;
        resolver.apply_states(batch);
        resolver.select_state("IDF");
        let batch = resolver.request_cities().fetch().await;
        resolver.apply_cities(batch);
        resolver.select_city("Paris");

        resolver.select_country("DE");
        assert_eq!(resolver.selection().state, None);
        assert_eq!(resolver.selection().city, None);
        assert!(resolver.states().is_empty());
        assert!(resolver.cities().is_empty());
    }

    #[tokio::test]
    async fn test_state_change_clears_city() {
        let mut resolver = GeographyResolver::new(Arc::new(FakeGeo));
        resolver.select_country("FR");
        resolver.select_state("IDF");
        resolver.select_city("Paris");

        resolver.select_state("BRE");
        assert_eq!(resolver.selection().city, None);
        assert!(resolver.cities().is_empty());
    }

    #[tokio::test]
    async fn test_invalidate_makes_pending_lookups_inert() {
        let mut resolver = GeographyResolver::new(Arc::new(FakeGeo));
        resolver.select_country("FR");
        let request = resolver.request_states();

        resolver.invalidate();

        let batch = request.fetch().await;
        assert!(!resolver.apply_states(batch));
        assert!(resolver.states().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_errors_degrade_to_empty() {
        let mut resolver = GeographyResolver::new(Arc::new(FailingGeo));
        resolver.load_countries().await;
        assert!(resolver.countries().is_empty());

        resolver.select_country("FR");
        let batch = resolver.request_states().fetch().await;
        assert!(resolver.apply_states(batch));
        assert!(resolver.states().is_empty());
    }
}
