//! Search orchestration: geocode, then points of interest, then weather.
//!
//! Each stage writes into the search or weather lane of the [`ViewStore`]
//! through the generation token taken when the search began, so a search
//! superseded mid-flight never overwrites the newer one.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::{SearchError, WeatherError};
use super::localization::Locale;
use super::location::{MapViewport, ResolvedLocation, SearchQuery};
use super::poi::{MAX_POINTS_OF_INTEREST, select_points_of_interest};
use super::ports::{
    GeocodeRequest, Geocoder, POI_SEARCH_RADIUS_METRES, POI_TAG_SELECTORS, PoiRequest, PoiSource,
    WeatherRequest, WeatherSource,
};
use super::view_state::{Generation, ViewState, ViewStore, WeatherLane};

const GEOCODE_LIMIT: u8 = 1;

/// Driven ports used by the search flow.
#[derive(Clone)]
pub struct SearchPorts {
    /// Place-name resolution.
    pub geocoder: Arc<dyn Geocoder>,
    /// Nearby tagged features.
    pub poi_source: Arc<dyn PoiSource>,
    /// Current conditions.
    pub weather_source: Arc<dyn WeatherSource>,
}

/// Runs searches and commits their results into the view.
#[derive(Clone)]
pub struct SearchService {
    ports: SearchPorts,
    store: Arc<ViewStore>,
    locale: Locale,
    country_codes: String,
}

impl SearchService {
    /// Create a service writing into `store`.
    pub fn new(
        ports: SearchPorts,
        store: Arc<ViewStore>,
        locale: Locale,
        country_codes: impl Into<String>,
    ) -> Self {
        Self {
            ports,
            store,
            locale,
            country_codes: country_codes.into(),
        }
    }

    /// Run one search for `raw_query`.
    ///
    /// A blank query only records [`SearchError::Validation`]. Otherwise the
    /// stages run strictly in order and each failure stops the flow at the
    /// stage that failed. Results land in the view; nothing is returned.
    pub async fn search(&self, raw_query: &str) {
        let Some(query) = SearchQuery::parse(raw_query) else {
            debug!("blank query rejected");
            self.store
                .update(|view| view.search.error = Some(SearchError::Validation));
            return;
        };

        let generation = self.store.begin_search();
        info!(query = query.text(), generation = generation.value(), "search started");

        let Some(location) = self.resolve_location(&query, generation).await else {
            return;
        };
        if !self.load_points_of_interest(&location, generation).await {
            return;
        }
        self.load_weather(&location, generation).await;

        self.store.commit(generation, |view| view.search.loading = false);
        info!(query = query.text(), location = %location, "search completed");
    }

    async fn resolve_location(
        &self,
        query: &SearchQuery,
        generation: Generation,
    ) -> Option<ResolvedLocation> {
        let request = GeocodeRequest {
            query: query.text().to_owned(),
            country_codes: self.country_codes.clone(),
            limit: GEOCODE_LIMIT,
        };

        let first = match self.ports.geocoder.geocode(&request).await {
            Ok(matches) => matches.into_iter().next(),
            Err(error) => {
                warn!(stage = "geocode", query = query.text(), error = %error, "geocode failed");
                None
            }
        };
        let location = first.and_then(|found| {
            let name = ResolvedLocation::label_from(found.display_name.as_deref(), query);
            ResolvedLocation::new(name, found.lat, found.lon)
                .inspect_err(|error| {
                    warn!(stage = "geocode", error = %error, "geocoder returned an invalid coordinate");
                })
                .ok()
        });

        let Some(location) = location else {
            debug!(stage = "geocode", query = query.text(), "no location matched");
            self.store.commit(generation, |view| {
                fail_search(view, SearchError::LocationNotFound);
            });
            return None;
        };

        let committed = self.store.commit(generation, |view| {
            view.viewport = MapViewport::following(&location);
            view.search.selected_location = Some(location.clone());
        });
        debug!(stage = "geocode", location = %location, "location resolved");
        committed.map(|()| location)
    }

    async fn load_points_of_interest(
        &self,
        location: &ResolvedLocation,
        generation: Generation,
    ) -> bool {
        let request = PoiRequest {
            lat: location.lat(),
            lon: location.lon(),
            radius_metres: POI_SEARCH_RADIUS_METRES,
            tags: POI_TAG_SELECTORS.iter().map(|tag| (*tag).to_owned()).collect(),
            limit: MAX_POINTS_OF_INTEREST,
        };

        match self.ports.poi_source.fetch_features(&request).await {
            Ok(features) => {
                let points = select_points_of_interest(features, self.locale);
                debug!(stage = "poi", count = points.len(), "points of interest loaded");
                self.store
                    .commit(generation, |view| view.search.points_of_interest = points)
                    .is_some()
            }
            Err(error) => {
                warn!(stage = "poi", location = %location, error = %error, "poi lookup failed");
                self.store.commit(generation, |view| {
                    fail_search(view, SearchError::SearchFailed);
                });
                false
            }
        }
    }

    async fn load_weather(&self, location: &ResolvedLocation, generation: Generation) {
        if self
            .store
            .commit(generation, |view| view.weather.loading = true)
            .is_none()
        {
            return;
        }

        let request = WeatherRequest {
            lat: location.lat(),
            lon: location.lon(),
            locale: self.locale,
        };
        let outcome = self.ports.weather_source.current_conditions(&request).await;
        if let Err(error) = &outcome {
            warn!(stage = "weather", location = %location, error = %error, "weather lookup failed");
        }

        self.store.commit(generation, |view| {
            view.weather.loading = false;
            match outcome {
                Ok(snapshot) => view.weather.snapshot = Some(snapshot),
                Err(_) => view.weather.error = Some(WeatherError::Unavailable),
            }
        });
    }
}

fn fail_search(view: &mut ViewState, error: SearchError) {
    view.search.loading = false;
    view.search.error = Some(error);
    view.search.selected_location = None;
    view.weather = WeatherLane::default();
}
