//! Test utilities for the explorer crate.
//!
//! Scripted port fakes shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Each fake pops one scripted result per call, records the
//! requests it saw, and can hold a call open behind a [`GateHandle`] so tests
//! control completion order.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{Notify, mpsc};

use crate::domain::auth_session::UserProfile;
use crate::domain::ports::{
    GeocodeMatch, GeocodeRequest, Geocoder, GeocoderError, IdentityProvider,
    IdentityProviderError, PoiFeature, PoiRequest, PoiSource, PoiSourceError,
    SessionSubscription, TranslationRequest, Translator, TranslatorError, WeatherRequest,
    WeatherSource, WeatherSourceError,
};
use crate::domain::weather::WeatherSnapshot;

struct CallGate {
    entered: mpsc::UnboundedSender<()>,
    release: Arc<Notify>,
}

/// Test-side handle for a gated call.
pub struct GateHandle {
    entered: mpsc::UnboundedReceiver<()>,
    release: Arc<Notify>,
}

impl GateHandle {
    /// Wait until the gated call has started.
    pub async fn wait_entered(&mut self) {
        self.entered.recv().await.expect("gated call should start");
    }

    /// Let the gated call complete.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

struct Script<Req, Resp> {
    responses: Mutex<VecDeque<Resp>>,
    requests: Mutex<Vec<Req>>,
    calls: AtomicUsize,
    gate: Mutex<Option<CallGate>>,
    exhausted: fn() -> Resp,
}

impl<Req, Resp> Script<Req, Resp> {
    fn new(responses: Vec<Resp>, exhausted: fn() -> Resp) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: Mutex::new(None),
            exhausted,
        }
    }

    fn push(&self, response: Resp) {
        self.responses
            .lock()
            .expect("script mutex")
            .push_back(response);
    }

    /// Gate the next call only.
    fn gate_next(&self) -> GateHandle {
        let (entered_tx, entered_rx) = mpsc::unbounded_channel();
        let release = Arc::new(Notify::new());
        self.gate.lock().expect("gate mutex").replace(CallGate {
            entered: entered_tx,
            release: Arc::clone(&release),
        });
        GateHandle {
            entered: entered_rx,
            release,
        }
    }

    async fn call(&self, request: Req) -> Resp {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("requests mutex").push(request);
        let response = self
            .responses
            .lock()
            .expect("script mutex")
            .pop_front()
            .unwrap_or_else(self.exhausted);
        let gate = self.gate.lock().expect("gate mutex").take();
        if let Some(CallGate { entered, release }) = gate {
            entered.send(()).expect("send gate entry");
            release.notified().await;
        }
        response
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<Req: Clone, Resp> Script<Req, Resp> {
    fn requests(&self) -> Vec<Req> {
        self.requests.lock().expect("requests mutex").clone()
    }
}

macro_rules! scripted_accessors {
    ($name:ident, $req:ty, $resp:ty) => {
        impl $name {
            /// Append a scripted result.
            pub fn push(&self, response: $resp) {
                self.script.push(response);
            }

            /// Hold the next call open until the returned gate is released.
            pub fn gate_next(&self) -> GateHandle {
                self.script.gate_next()
            }

            /// Number of calls received.
            pub fn call_count(&self) -> usize {
                self.script.call_count()
            }

            /// Requests received, in call order.
            pub fn requests(&self) -> Vec<$req> {
                self.script.requests()
            }
        }
    };
}

/// Scripted [`Geocoder`].
pub struct ScriptedGeocoder {
    script: Script<GeocodeRequest, Result<Vec<GeocodeMatch>, GeocoderError>>,
}

impl ScriptedGeocoder {
    /// Fake answering calls with `responses` in order.
    pub fn new(responses: Vec<Result<Vec<GeocodeMatch>, GeocoderError>>) -> Self {
        Self {
            script: Script::new(responses, || {
                Err(GeocoderError::transport("geocoder script exhausted"))
            }),
        }
    }
}

scripted_accessors!(
    ScriptedGeocoder,
    GeocodeRequest,
    Result<Vec<GeocodeMatch>, GeocoderError>
);

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn geocode(&self, request: &GeocodeRequest) -> Result<Vec<GeocodeMatch>, GeocoderError> {
        self.script.call(request.clone()).await
    }
}

/// Scripted [`PoiSource`].
pub struct ScriptedPoiSource {
    script: Script<PoiRequest, Result<Vec<PoiFeature>, PoiSourceError>>,
}

impl ScriptedPoiSource {
    /// Fake answering calls with `responses` in order.
    pub fn new(responses: Vec<Result<Vec<PoiFeature>, PoiSourceError>>) -> Self {
        Self {
            script: Script::new(responses, || {
                Err(PoiSourceError::transport("poi script exhausted"))
            }),
        }
    }
}

scripted_accessors!(
    ScriptedPoiSource,
    PoiRequest,
    Result<Vec<PoiFeature>, PoiSourceError>
);

#[async_trait]
impl PoiSource for ScriptedPoiSource {
    async fn fetch_features(&self, request: &PoiRequest) -> Result<Vec<PoiFeature>, PoiSourceError> {
        self.script.call(request.clone()).await
    }
}

/// Scripted [`WeatherSource`].
pub struct ScriptedWeatherSource {
    script: Script<WeatherRequest, Result<WeatherSnapshot, WeatherSourceError>>,
}

impl ScriptedWeatherSource {
    /// Fake answering calls with `responses` in order.
    pub fn new(responses: Vec<Result<WeatherSnapshot, WeatherSourceError>>) -> Self {
        Self {
            script: Script::new(responses, || {
                Err(WeatherSourceError::transport("weather script exhausted"))
            }),
        }
    }
}

scripted_accessors!(
    ScriptedWeatherSource,
    WeatherRequest,
    Result<WeatherSnapshot, WeatherSourceError>
);

#[async_trait]
impl WeatherSource for ScriptedWeatherSource {
    async fn current_conditions(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherSnapshot, WeatherSourceError> {
        self.script.call(*request).await
    }
}

/// Scripted [`Translator`].
pub struct ScriptedTranslator {
    script: Script<TranslationRequest, Result<String, TranslatorError>>,
}

impl ScriptedTranslator {
    /// Fake answering calls with `responses` in order.
    pub fn new(responses: Vec<Result<String, TranslatorError>>) -> Self {
        Self {
            script: Script::new(responses, || {
                Err(TranslatorError::transport("translator script exhausted"))
            }),
        }
    }
}

scripted_accessors!(
    ScriptedTranslator,
    TranslationRequest,
    Result<String, TranslatorError>
);

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslatorError> {
        self.script.call(request.clone()).await
    }
}

/// Scripted [`IdentityProvider`] with a controllable session stream.
pub struct ScriptedIdentityProvider {
    configured: bool,
    sender: mpsc::UnboundedSender<Option<UserProfile>>,
    subscription: Mutex<Option<SessionSubscription>>,
    subscribe_calls: AtomicUsize,
    sign_in: Script<(), Result<UserProfile, IdentityProviderError>>,
    sign_out: Script<(), Result<(), IdentityProviderError>>,
}

impl ScriptedIdentityProvider {
    /// Provider reporting usable configuration.
    pub fn configured() -> Self {
        Self::with_configuration(true)
    }

    /// Provider reporting missing configuration.
    pub fn unconfigured() -> Self {
        Self::with_configuration(false)
    }

    fn with_configuration(configured: bool) -> Self {
        let (sender, subscription) = SessionSubscription::channel();
        Self {
            configured,
            sender,
            subscription: Mutex::new(Some(subscription)),
            subscribe_calls: AtomicUsize::new(0),
            sign_in: Script::new(Vec::new(), || {
                Err(IdentityProviderError::unavailable("sign-in script exhausted"))
            }),
            sign_out: Script::new(Vec::new(), || Ok(())),
        }
    }

    /// Publish a session change. Returns `false` once the subscriber is gone.
    pub fn emit(&self, user: Option<UserProfile>) -> bool {
        self.sender.send(user).is_ok()
    }

    /// Number of `subscribe` calls.
    pub fn subscribe_count(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    /// Append a scripted sign-in result.
    pub fn push_sign_in(&self, result: Result<UserProfile, IdentityProviderError>) {
        self.sign_in.push(result);
    }

    /// Append a scripted sign-out result.
    pub fn push_sign_out(&self, result: Result<(), IdentityProviderError>) {
        self.sign_out.push(result);
    }

    /// Hold the next sign-in call open.
    pub fn gate_next_sign_in(&self) -> GateHandle {
        self.sign_in.gate_next()
    }

    /// Hold the next sign-out call open.
    pub fn gate_next_sign_out(&self) -> GateHandle {
        self.sign_out.gate_next()
    }

    /// Number of sign-in calls received.
    pub fn sign_in_count(&self) -> usize {
        self.sign_in.call_count()
    }

    /// Number of sign-out calls received.
    pub fn sign_out_count(&self) -> usize {
        self.sign_out.call_count()
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentityProvider {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn subscribe(&self) -> SessionSubscription {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.subscription
            .lock()
            .expect("subscription mutex")
            .take()
            .unwrap_or_else(|| SessionSubscription::channel().1)
    }

    async fn sign_in(&self) -> Result<UserProfile, IdentityProviderError> {
        self.sign_in.call(()).await
    }

    async fn sign_out(&self) -> Result<(), IdentityProviderError> {
        self.sign_out.call(()).await
    }
}

/// Geocoder match for Hoi An as Nominatim reports it.
pub fn hoi_an_match() -> GeocodeMatch {
    GeocodeMatch {
        lat: 15.8801,
        lon: 108.338,
        display_name: Some("Hoi An, Quang Nam, Vietnam".to_owned()),
    }
}

/// Geocoder match for Hue.
pub fn hue_match() -> GeocodeMatch {
    GeocodeMatch {
        lat: 16.4637,
        lon: 107.5909,
        display_name: Some("Huế, Thừa Thiên Huế, Việt Nam".to_owned()),
    }
}

/// Raw feature with the given tags.
pub fn feature(id: i64, tags: &[(&str, &str)]) -> PoiFeature {
    PoiFeature {
        id,
        lat: 15.877,
        lon: 108.326,
        tags: tags
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect::<BTreeMap<_, _>>(),
    }
}

/// `count` shop features with ids `1..=count`.
pub fn shop_features(count: i64) -> Vec<PoiFeature> {
    (1..=count)
        .map(|id| feature(id, &[("shop", "souvenir")]))
        .collect()
}

/// Typical current conditions.
pub fn sample_weather() -> WeatherSnapshot {
    WeatherSnapshot {
        description: "mây rải rác".to_owned(),
        temperature_c: Some(30.4),
        feels_like_c: Some(35.1),
        humidity_pct: Some(70.0),
        wind_speed_ms: Some(2.57),
        icon: Some("03d".to_owned()),
        place_name: Some("Hội An".to_owned()),
    }
}

/// Signed-in user profile.
pub fn profile(email: &str) -> UserProfile {
    UserProfile {
        display_name: Some("Lan Nguyen".to_owned()),
        email: email.to_owned(),
        photo_url: None,
    }
}
