//! Driven port for current weather conditions.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::localization::Locale;
use crate::domain::weather::WeatherSnapshot;

/// Domain-owned request passed to the weather adapter. Units are metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRequest {
    /// Latitude in WGS84.
    pub lat: f64,
    /// Longitude in WGS84.
    pub lon: f64,
    /// Language for the condition description.
    pub locale: Locale,
}

define_port_error! {
    /// Errors surfaced while calling the weather provider.
    pub enum WeatherSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "weather transport failed: {message}",
        /// The provider answered with a non-success status.
        Status { message: String } =>
            "weather provider returned an error status: {message}",
        /// The provider response could not be decoded.
        Decode { message: String } =>
            "weather response decode failed: {message}",
    }
}

/// Port for current-conditions lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch current conditions at the requested coordinate.
    async fn current_conditions(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherSnapshot, WeatherSourceError>;
}
