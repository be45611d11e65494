//! Latest-action-wins behaviour across the explorer facade.

use std::sync::Arc;

use explorer::domain::Locale;
use explorer::test_support::{
    ScriptedGeocoder, ScriptedIdentityProvider, ScriptedPoiSource, ScriptedTranslator,
    ScriptedWeatherSource, hoi_an_match, hue_match, profile, sample_weather, shop_features,
};
use explorer::{Explorer, ExplorerPorts};
use rstest::{fixture, rstest};

struct Fakes {
    geocoder: Arc<ScriptedGeocoder>,
    poi_source: Arc<ScriptedPoiSource>,
    weather_source: Arc<ScriptedWeatherSource>,
    translator: Arc<ScriptedTranslator>,
    identity: Arc<ScriptedIdentityProvider>,
}

impl Fakes {
    fn explorer(&self) -> Arc<Explorer> {
        Arc::new(Explorer::with_ports(
            ExplorerPorts {
                geocoder: self.geocoder.clone(),
                poi_source: self.poi_source.clone(),
                weather_source: self.weather_source.clone(),
                translator: self.translator.clone(),
                identity: self.identity.clone(),
            },
            Locale::Vietnamese,
            "vn",
            true,
        ))
    }
}

#[fixture]
fn fakes() -> Fakes {
    Fakes {
        geocoder: Arc::new(ScriptedGeocoder::new(Vec::new())),
        poi_source: Arc::new(ScriptedPoiSource::new(Vec::new())),
        weather_source: Arc::new(ScriptedWeatherSource::new(Vec::new())),
        translator: Arc::new(ScriptedTranslator::new(Vec::new())),
        identity: Arc::new(ScriptedIdentityProvider::configured()),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_weather_from_an_older_search_is_discarded(fakes: Fakes) {
    fakes.geocoder.push(Ok(vec![hoi_an_match()]));
    fakes.geocoder.push(Ok(vec![hue_match()]));
    fakes.poi_source.push(Ok(shop_features(4)));
    fakes.poi_source.push(Ok(shop_features(2)));
    fakes.weather_source.push(Ok(sample_weather()));
    let mut hue_weather = sample_weather();
    hue_weather.place_name = Some("Huế".to_owned());
    fakes.weather_source.push(Ok(hue_weather));
    let mut gate = fakes.weather_source.gate_next();
    let explorer = fakes.explorer();

    let stale = tokio::spawn({
        let explorer = Arc::clone(&explorer);
        async move { explorer.search("Hoi An").await }
    });
    gate.wait_entered().await;
    assert!(explorer.view().weather.loading);

    explorer.search("Hue").await;
    gate.release();
    stale.await.expect("stale search joins");

    let view = explorer.view();
    assert_eq!(view.query, "Hue");
    assert_eq!(view.search.points_of_interest.len(), 2);
    assert_eq!(explorer.weather_marker().expect("marker").name, "Huế");
    assert!(!view.search.loading);
    assert!(!view.weather.loading);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_translation_does_not_replace_a_newer_one(fakes: Fakes) {
    fakes.translator.push(Ok("Tạm biệt".to_owned()));
    fakes.translator.push(Ok("Xin chào".to_owned()));
    let mut gate = fakes.translator.gate_next();
    let explorer = fakes.explorer();
    fakes.identity.emit(Some(profile("lan@example.com")));
    explorer
        .watch_auth()
        .wait_for(|snapshot| snapshot.session.user().is_some())
        .await
        .map(|_| ())
        .expect("state sender alive");
    assert!(explorer.can_translate());

    explorer.set_translation_text("Goodbye");
    let stale = tokio::spawn({
        let explorer = Arc::clone(&explorer);
        async move { explorer.translate().await }
    });
    gate.wait_entered().await;
    assert!(!explorer.can_translate(), "translate is disabled while in flight");

    explorer.set_translation_text("Hello");
    explorer.translate().await;
    gate.release();
    stale.await.expect("stale translation joins");

    let result = explorer.view().translation.result.expect("result");
    assert_eq!(result.translated_text, "Xin chào");
    assert_eq!(fakes.translator.call_count(), 2);
}

#[rstest]
#[tokio::test]
async fn shutdown_drops_the_session_subscription(fakes: Fakes) {
    let explorer = fakes.explorer();
    assert!(fakes.identity.emit(None));

    explorer.shutdown();
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while fakes.identity.emit(None) {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("subscription closed after shutdown");
    assert_eq!(fakes.identity.subscribe_count(), 1);
}
