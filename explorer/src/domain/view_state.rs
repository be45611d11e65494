//! Lane-partitioned view state and the store that guards it.
//!
//! The search, weather and translation lanes are disjoint field groups. The
//! store hands out a generation token when a lane action starts and drops
//! commits from superseded generations, so the most recent user action wins
//! regardless of completion order.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::error::{SearchError, TranslateError, WeatherError};
use super::location::{MapViewport, ResolvedLocation};
use super::poi::PointOfInterest;
use super::translation::TranslationResult;
use super::weather::{WeatherMarker, WeatherSnapshot};

/// Search-lane fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchLane {
    /// A search is in flight.
    pub loading: bool,
    /// Last search error.
    pub error: Option<SearchError>,
    /// Location chosen by the latest successful geocode.
    pub selected_location: Option<ResolvedLocation>,
    /// Points of interest around the selected location.
    pub points_of_interest: Vec<PointOfInterest>,
}

/// Weather-lane fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherLane {
    /// A weather lookup is in flight.
    pub loading: bool,
    /// Current conditions for the selected location.
    pub snapshot: Option<WeatherSnapshot>,
    /// Last weather error.
    pub error: Option<WeatherError>,
}

/// Translation-lane fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslationLane {
    /// Text currently typed into the translate input.
    pub text: String,
    /// A translation is in flight.
    pub translating: bool,
    /// Result of the most recent translate action.
    pub result: Option<TranslationResult>,
    /// Last translation error.
    pub error: Option<TranslateError>,
}

/// Everything the presentation layer reads.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    /// Current query text, overwritten per keystroke.
    pub query: String,
    /// Map center and zoom.
    pub viewport: MapViewport,
    /// Search lane.
    pub search: SearchLane,
    /// Weather lane.
    pub weather: WeatherLane,
    /// Translation lane.
    pub translation: TranslationLane,
}

impl ViewState {
    /// Weather marker for the selected location, derived on each call.
    pub fn weather_marker(&self) -> Option<WeatherMarker> {
        match (&self.search.selected_location, &self.weather.snapshot) {
            (Some(location), Some(snapshot)) => Some(WeatherMarker::new(location, snapshot)),
            _ => None,
        }
    }

    fn reset_for_search(&mut self) {
        self.search.loading = true;
        self.search.error = None;
        self.search.selected_location = None;
        self.search.points_of_interest.clear();
        self.weather = WeatherLane::default();
    }
}

/// Lanes that hand out generation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// Search and its weather stage.
    Search,
    /// Translate action.
    Translation,
}

/// Token identifying one lane action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    lane: Lane,
    value: u64,
}

impl Generation {
    /// Lane the token belongs to.
    pub fn lane(self) -> Lane {
        self.lane
    }

    /// Sequence number within the lane.
    pub fn value(self) -> u64 {
        self.value
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    view: ViewState,
    search_generation: u64,
    translation_generation: u64,
}

impl StoreInner {
    fn current(&self, lane: Lane) -> u64 {
        match lane {
            Lane::Search => self.search_generation,
            Lane::Translation => self.translation_generation,
        }
    }

    fn bump(&mut self, lane: Lane) -> Generation {
        let counter = match lane {
            Lane::Search => &mut self.search_generation,
            Lane::Translation => &mut self.translation_generation,
        };
        *counter = counter.wrapping_add(1);
        Generation {
            lane,
            value: *counter,
        }
    }
}

/// Shared owner of the [`ViewState`].
///
/// The lock is only held for the duration of a closure and never across an
/// `.await`.
#[derive(Debug, Default)]
pub struct ViewStore {
    inner: Mutex<StoreInner>,
}

impl ViewStore {
    /// Create a store holding the initial view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone the current view.
    pub fn snapshot(&self) -> ViewState {
        self.lock().view.clone()
    }

    /// Apply an unconditional update.
    pub fn update<R>(&self, apply: impl FnOnce(&mut ViewState) -> R) -> R {
        apply(&mut self.lock().view)
    }

    /// Start a new search: supersede older searches and reset the search and
    /// weather lanes.
    pub fn begin_search(&self) -> Generation {
        let mut inner = self.lock();
        let generation = inner.bump(Lane::Search);
        inner.view.reset_for_search();
        generation
    }

    /// Start a new translate action and apply `reset` to the view.
    pub fn begin_translation(&self, reset: impl FnOnce(&mut TranslationLane)) -> Generation {
        let mut inner = self.lock();
        let generation = inner.bump(Lane::Translation);
        reset(&mut inner.view.translation);
        generation
    }

    /// Whether `generation` is still the latest in its lane.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.lock().current(generation.lane) == generation.value
    }

    /// Apply `apply` only when `generation` is still current. Returns `None`
    /// when the commit was discarded.
    pub fn commit<R>(
        &self,
        generation: Generation,
        apply: impl FnOnce(&mut ViewState) -> R,
    ) -> Option<R> {
        let mut inner = self.lock();
        if inner.current(generation.lane) != generation.value {
            debug!(
                lane = ?generation.lane,
                generation = generation.value,
                latest = inner.current(generation.lane),
                "discarding superseded commit"
            );
            return None;
        }
        Some(apply(&mut inner.view))
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
