//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod geocoder;
mod identity_provider;
mod poi_source;
mod translator;
mod weather_source;

#[cfg(test)]
pub use geocoder::MockGeocoder;
pub use geocoder::{GeocodeMatch, GeocodeRequest, Geocoder, GeocoderError};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    DisabledIdentityProvider, IdentityProvider, IdentityProviderError, SessionSubscription,
};
#[cfg(test)]
pub use poi_source::MockPoiSource;
pub use poi_source::{
    POI_SEARCH_RADIUS_METRES, POI_TAG_SELECTORS, PoiFeature, PoiRequest, PoiSource,
    PoiSourceError,
};
#[cfg(test)]
pub use translator::MockTranslator;
pub use translator::{LanguagePair, TranslationRequest, Translator, TranslatorError};
#[cfg(test)]
pub use weather_source::MockWeatherSource;
pub use weather_source::{WeatherRequest, WeatherSource, WeatherSourceError};
