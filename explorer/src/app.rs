//! Explorer facade: wires configuration, adapters and services, and exposes
//! the user actions and read side to a presentation layer.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::config::ExplorerConfig;
use crate::domain::auth_session::{AuthSessionManager, AuthSnapshot};
use crate::domain::error::AuthError;
use crate::domain::localization::Locale;
use crate::domain::ports::{Geocoder, IdentityProvider, PoiSource, Translator, WeatherSource};
use crate::domain::search_service::{SearchPorts, SearchService};
use crate::domain::translation_service::TranslationService;
use crate::domain::view_state::{ViewState, ViewStore};
use crate::domain::weather::WeatherMarker;
use crate::outbound::http_support::build_client;
use crate::outbound::{
    MyMemoryHttpTranslator, NominatimHttpGeocoder, OpenWeatherHttpSource, OverpassHttpPoiSource,
};

const SUBMIT_KEY: &str = "Enter";

/// Errors raised while wiring the explorer.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerBuildError {
    /// The shared HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Port implementations used by [`Explorer::with_ports`].
#[derive(Clone)]
pub struct ExplorerPorts {
    /// Place-name resolution.
    pub geocoder: Arc<dyn Geocoder>,
    /// Nearby tagged features.
    pub poi_source: Arc<dyn PoiSource>,
    /// Current conditions.
    pub weather_source: Arc<dyn WeatherSource>,
    /// English to Vietnamese translation.
    pub translator: Arc<dyn Translator>,
    /// Identity backend gating translation.
    pub identity: Arc<dyn IdentityProvider>,
}

/// Entry point for a presentation layer.
///
/// Construct inside a Tokio runtime: the session manager spawns its listener
/// on creation.
pub struct Explorer {
    locale: Locale,
    store: Arc<ViewStore>,
    search: SearchService,
    translation: TranslationService,
    auth: Arc<AuthSessionManager>,
}

impl Explorer {
    /// Wire the HTTP adapters described by `config`.
    ///
    /// `identity` backs sign-in; pass a
    /// [`DisabledIdentityProvider`](crate::domain::ports::DisabledIdentityProvider)
    /// on hosts without an identity backend.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerBuildError::HttpClient`] when the reqwest client
    /// cannot be constructed.
    pub fn from_config(
        config: &ExplorerConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, ExplorerBuildError> {
        let client = build_client(&config.http.user_agent, config.http.timeout)?;
        let endpoints = &config.endpoints;
        let ports = ExplorerPorts {
            geocoder: Arc::new(NominatimHttpGeocoder::new(
                client.clone(),
                endpoints.nominatim.clone(),
            )),
            poi_source: Arc::new(OverpassHttpPoiSource::new(
                client.clone(),
                endpoints.overpass.clone(),
            )),
            weather_source: Arc::new(OpenWeatherHttpSource::new(
                client.clone(),
                endpoints.openweather.clone(),
                config.openweather_api_key.clone(),
            )),
            translator: Arc::new(MyMemoryHttpTranslator::new(
                client,
                endpoints.mymemory.clone(),
            )),
            identity,
        };
        Ok(Self::with_ports(
            ports,
            config.locale,
            &config.country_codes,
            config.identity_configured(),
        ))
    }

    /// Wire the services over caller-supplied ports.
    pub fn with_ports(
        ports: ExplorerPorts,
        locale: Locale,
        country_codes: &str,
        identity_configured: bool,
    ) -> Self {
        let store = Arc::new(ViewStore::new());
        let auth = Arc::new(AuthSessionManager::start(ports.identity, identity_configured));
        let search = SearchService::new(
            SearchPorts {
                geocoder: ports.geocoder,
                poi_source: ports.poi_source,
                weather_source: ports.weather_source,
            },
            Arc::clone(&store),
            locale,
            country_codes,
        );
        let translation =
            TranslationService::new(ports.translator, Arc::clone(&store), Arc::clone(&auth));
        info!(locale = %locale, identity_configured, "explorer ready");
        Self {
            locale,
            store,
            search,
            translation,
            auth,
        }
    }

    /// Locale used for user-facing copy.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Current view.
    pub fn view(&self) -> ViewState {
        self.store.snapshot()
    }

    /// Weather marker for the current view, if any.
    pub fn weather_marker(&self) -> Option<WeatherMarker> {
        self.store.snapshot().weather_marker()
    }

    /// Current auth state.
    pub fn auth(&self) -> AuthSnapshot {
        self.auth.snapshot()
    }

    /// Receiver notified on every auth state change.
    pub fn watch_auth(&self) -> watch::Receiver<AuthSnapshot> {
        self.auth.watch()
    }

    /// Whether the translate action is currently available.
    pub fn can_translate(&self) -> bool {
        self.auth.is_configured()
            && self.auth.snapshot().session.user().is_some()
            && !self.store.snapshot().translation.translating
    }

    /// Overwrite the query text.
    pub fn set_query(&self, text: &str) {
        self.store.update(|view| view.query = text.to_owned());
    }

    /// Handle a key press in the query field; `Enter` submits.
    pub async fn handle_query_key(&self, key: &str) {
        if key == SUBMIT_KEY {
            self.submit_search().await;
        }
    }

    /// Search for the current query text.
    pub async fn submit_search(&self) {
        let query = self.store.update(|view| view.query.clone());
        self.search.search(&query).await;
    }

    /// Set the query text and search for it.
    pub async fn search(&self, query: &str) {
        self.set_query(query);
        self.search.search(query).await;
    }

    /// Overwrite the translation input.
    pub fn set_translation_text(&self, text: &str) {
        self.store
            .update(|view| view.translation.text = text.to_owned());
    }

    /// Translate the current translation input.
    pub async fn translate(&self) {
        self.translation.translate().await;
    }

    /// Run the sign-in flow.
    ///
    /// # Errors
    ///
    /// See [`AuthSessionManager::sign_in`].
    pub async fn sign_in(&self) -> Result<(), AuthError> {
        self.auth.sign_in().await
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// See [`AuthSessionManager::sign_out`].
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.auth.sign_out().await
    }

    /// Tear down the session subscription.
    pub fn shutdown(&self) {
        self.auth.shutdown();
    }
}
