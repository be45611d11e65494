//! Driven port for resolving free-text place names.

use async_trait::async_trait;

use super::define_port_error;

/// Domain-owned geocode request passed to the geocoder adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeRequest {
    /// Trimmed free-text query.
    pub query: String,
    /// Comma-separated ISO country codes restricting matches.
    pub country_codes: String,
    /// Maximum number of matches requested.
    pub limit: u8,
}

/// One geocoder match with parsed, range-checked coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    /// Latitude in WGS84.
    pub lat: f64,
    /// Longitude in WGS84.
    pub lon: f64,
    /// Provider display label, when present.
    pub display_name: Option<String>,
}

define_port_error! {
    /// Errors surfaced while calling the geocoder.
    pub enum GeocoderError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "geocoder transport failed: {message}",
        /// The geocoder answered with a non-success status.
        Status { message: String } =>
            "geocoder returned an error status: {message}",
        /// The geocoder response could not be decoded.
        Decode { message: String } =>
            "geocoder response decode failed: {message}",
    }
}

/// Port for free-text geocoding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a query into matches, best match first. An empty vector means
    /// the provider found nothing.
    async fn geocode(&self, request: &GeocodeRequest) -> Result<Vec<GeocodeMatch>, GeocoderError>;
}
