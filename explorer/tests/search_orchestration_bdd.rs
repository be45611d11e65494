//! Behaviour tests for the search flow driven through the explorer facade.

use std::sync::Arc;

use explorer::domain::Locale;
use explorer::domain::ports::{PoiSourceError, WeatherSourceError};
use explorer::test_support::{
    ScriptedGeocoder, ScriptedIdentityProvider, ScriptedPoiSource, ScriptedTranslator,
    ScriptedWeatherSource, hoi_an_match, sample_weather, shop_features,
};
use explorer::{Explorer, ExplorerPorts};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

struct SearchWorld {
    explorer: Explorer,
    geocoder: Arc<ScriptedGeocoder>,
    poi_source: Arc<ScriptedPoiSource>,
    weather_source: Arc<ScriptedWeatherSource>,
    runtime: tokio::runtime::Runtime,
}

impl SearchWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let geocoder = Arc::new(ScriptedGeocoder::new(Vec::new()));
        let poi_source = Arc::new(ScriptedPoiSource::new(Vec::new()));
        let weather_source = Arc::new(ScriptedWeatherSource::new(Vec::new()));
        let ports = ExplorerPorts {
            geocoder: geocoder.clone(),
            poi_source: poi_source.clone(),
            weather_source: weather_source.clone(),
            translator: Arc::new(ScriptedTranslator::new(Vec::new())),
            identity: Arc::new(ScriptedIdentityProvider::unconfigured()),
        };
        let explorer =
            runtime.block_on(async { Explorer::with_ports(ports, Locale::English, "vn", false) });
        Self {
            explorer,
            geocoder,
            poi_source,
            weather_source,
            runtime,
        }
    }

    fn type_and_submit(&self, query: &str) {
        self.explorer.set_query(query);
        self.runtime
            .block_on(self.explorer.handle_query_key("Enter"));
    }
}

#[fixture]
fn world() -> SearchWorld {
    SearchWorld::new()
}

#[given("the geocoder resolves Hoi An")]
fn the_geocoder_resolves_hoi_an(world: &SearchWorld) {
    world.geocoder.push(Ok(vec![hoi_an_match()]));
}

#[given("the geocoder finds nothing")]
fn the_geocoder_finds_nothing(world: &SearchWorld) {
    world.geocoder.push(Ok(Vec::new()));
}

#[given("the POI source returns {count} features")]
fn the_poi_source_returns_features(world: &SearchWorld, count: i64) {
    world.poi_source.push(Ok(shop_features(count)));
}

#[given("the POI source fails")]
fn the_poi_source_fails(world: &SearchWorld) {
    world
        .poi_source
        .push(Err(PoiSourceError::status("status 504: gateway timeout")));
}

#[given("the weather source reports current conditions")]
fn the_weather_source_reports_current_conditions(world: &SearchWorld) {
    world.weather_source.push(Ok(sample_weather()));
}

#[given("the weather source fails")]
fn the_weather_source_fails(world: &SearchWorld) {
    world
        .weather_source
        .push(Err(WeatherSourceError::status("status 401")));
}

#[when("the user types \"{query}\" and presses Enter")]
fn the_user_types_and_presses_enter(world: &SearchWorld, query: String) {
    world.type_and_submit(&query);
}

#[when("the user submits a blank query")]
fn the_user_submits_a_blank_query(world: &SearchWorld) {
    world.type_and_submit("   ");
}

#[then("the selected location is named \"{name}\"")]
fn the_selected_location_is_named(world: &SearchWorld, name: String) {
    let view = world.explorer.view();
    let location = view.search.selected_location.expect("location selected");
    assert_eq!(location.name(), name);
}

#[then("{count} points of interest are shown")]
fn points_of_interest_are_shown(world: &SearchWorld, count: usize) {
    assert_eq!(world.explorer.view().search.points_of_interest.len(), count);
}

#[then("the weather marker shows \"{temperature}\"")]
fn the_weather_marker_shows(world: &SearchWorld, temperature: String) {
    let marker = world.explorer.weather_marker().expect("weather marker");
    assert_eq!(marker.display.temperature, temperature);
}

#[then("no search error is shown")]
fn no_search_error_is_shown(world: &SearchWorld) {
    let view = world.explorer.view();
    assert!(view.search.error.is_none());
    assert!(!view.search.loading);
}

#[then("the search error reads \"{message}\"")]
fn the_search_error_reads(world: &SearchWorld, message: String) {
    let error = world.explorer.view().search.error.expect("search error");
    assert_eq!(error.message(world.explorer.locale()), message);
}

#[then("the weather error reads \"{message}\"")]
fn the_weather_error_reads(world: &SearchWorld, message: String) {
    let error = world.explorer.view().weather.error.expect("weather error");
    assert_eq!(error.message(world.explorer.locale()), message);
}

#[then("no location is selected")]
fn no_location_is_selected(world: &SearchWorld) {
    let view = world.explorer.view();
    assert!(view.search.selected_location.is_none());
    assert!(view.weather_marker().is_none());
}

#[then("no provider was called")]
fn no_provider_was_called(world: &SearchWorld) {
    assert_eq!(world.geocoder.call_count(), 0);
    assert_eq!(world.poi_source.call_count(), 0);
    assert_eq!(world.weather_source.call_count(), 0);
}

#[then("the weather source was not called")]
fn the_weather_source_was_not_called(world: &SearchWorld) {
    assert_eq!(world.weather_source.call_count(), 0);
}

#[scenario(
    path = "tests/features/search_orchestration.feature",
    name = "Searching a known place fills location, points of interest and weather"
)]
fn searching_a_known_place(world: SearchWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/search_orchestration.feature",
    name = "A blank query is rejected without network calls"
)]
fn a_blank_query_is_rejected(world: SearchWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/search_orchestration.feature",
    name = "An unknown place reports that no location was found"
)]
fn an_unknown_place_reports_not_found(world: SearchWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/search_orchestration.feature",
    name = "A POI failure skips the weather lookup"
)]
fn a_poi_failure_skips_weather(world: SearchWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/search_orchestration.feature",
    name = "A weather failure keeps points of interest"
)]
fn a_weather_failure_keeps_points_of_interest(world: SearchWorld) {
    drop(world);
}
