//! DTOs for the OpenWeather `/data/2.5/weather` payload.
//!
//! Every section is optional on the wire; absent values stay absent in the
//! snapshot and render as placeholders.

use serde::Deserialize;

use crate::domain::weather::WeatherSnapshot;

#[derive(Debug, Deserialize)]
pub(super) struct CurrentWeatherDto {
    #[serde(default)]
    pub(super) weather: Vec<ConditionDto>,
    #[serde(default)]
    pub(super) main: Option<MainDto>,
    #[serde(default)]
    pub(super) wind: Option<WindDto>,
    #[serde(default)]
    pub(super) name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ConditionDto {
    #[serde(default)]
    pub(super) description: Option<String>,
    #[serde(default)]
    pub(super) icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MainDto {
    pub(super) temp: Option<f64>,
    pub(super) feels_like: Option<f64>,
    pub(super) humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WindDto {
    pub(super) speed: Option<f64>,
}

impl CurrentWeatherDto {
    pub(super) fn into_snapshot(self) -> WeatherSnapshot {
        let condition = self.weather.into_iter().next();
        let (description, icon) = condition
            .map(|condition| (condition.description.unwrap_or_default(), condition.icon))
            .unwrap_or_default();
        let main = self.main;
        WeatherSnapshot {
            description,
            temperature_c: main.as_ref().and_then(|main| main.temp),
            feels_like_c: main.as_ref().and_then(|main| main.feels_like),
            humidity_pct: main.as_ref().and_then(|main| main.humidity),
            wind_speed_ms: self.wind.and_then(|wind| wind.speed),
            icon: icon.filter(|icon| !icon.is_empty()),
            place_name: self.name.filter(|name| !name.trim().is_empty()),
        }
    }
}
