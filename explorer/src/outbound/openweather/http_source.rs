//! Reqwest-backed OpenWeather source.

use async_trait::async_trait;
use reqwest::{Client, Url};
use zeroize::Zeroizing;

use super::dto::CurrentWeatherDto;
use crate::domain::ports::{WeatherRequest, WeatherSource, WeatherSourceError};
use crate::domain::weather::WeatherSnapshot;
use crate::outbound::http_support::status_message;

/// Weather source issuing metric current-conditions lookups.
///
/// The API key is optional; without one the provider answers 401 and the
/// weather lane reports the lookup as unavailable. Transport errors are
/// stripped of the request URL so the key never reaches the logs.
pub struct OpenWeatherHttpSource {
    client: Client,
    endpoint: Url,
    api_key: Option<Zeroizing<String>>,
}

impl OpenWeatherHttpSource {
    /// Create an adapter over a shared client.
    pub fn new(client: Client, endpoint: Url, api_key: Option<Zeroizing<String>>) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    fn query_params(&self, request: &WeatherRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("lat", request.lat.to_string()),
            ("lon", request.lon.to_string()),
            ("units", "metric".to_owned()),
            ("lang", request.locale.code().to_owned()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("appid", key.as_str().to_owned()));
        }
        params
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherHttpSource {
    async fn current_conditions(
        &self,
        request: &WeatherRequest,
    ) -> Result<WeatherSnapshot, WeatherSourceError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&self.query_params(request))
            .send()
            .await
            .map_err(|error| WeatherSourceError::transport(error.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| WeatherSourceError::transport(error.without_url().to_string()))?;
        if !status.is_success() {
            return Err(WeatherSourceError::status(status_message(
                status,
                body.as_ref(),
            )));
        }
        parse_snapshot(body.as_ref())
    }
}

fn parse_snapshot(body: &[u8]) -> Result<WeatherSnapshot, WeatherSourceError> {
    let decoded: CurrentWeatherDto = serde_json::from_slice(body).map_err(|error| {
        WeatherSourceError::decode(format!("invalid OpenWeather JSON payload: {error}"))
    })?;
    Ok(decoded.into_snapshot())
}
