//! Current-conditions snapshot and its derived display strings.
//!
//! The snapshot stores provider values only. Display strings are derived on
//! every read through [`WeatherSnapshot::display`] so they can never drift
//! from the snapshot they describe.

use super::location::ResolvedLocation;

const PLACEHOLDER: &str = "--";
const ICON_URL_PREFIX: &str = "https://openweathermap.org/img/wn/";

/// Current conditions at the resolved location, in metric units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherSnapshot {
    /// Condition description in the requested locale (may be empty).
    pub description: String,
    /// Air temperature in °C.
    pub temperature_c: Option<f64>,
    /// Apparent temperature in °C.
    pub feels_like_c: Option<f64>,
    /// Relative humidity in percent.
    pub humidity_pct: Option<f64>,
    /// Wind speed in m/s.
    pub wind_speed_ms: Option<f64>,
    /// Provider icon reference (for example `04d`).
    pub icon: Option<String>,
    /// Provider's name for the place, when reported.
    pub place_name: Option<String>,
}

impl WeatherSnapshot {
    /// Derive display strings from the current values.
    pub fn display(&self) -> WeatherDisplay {
        WeatherDisplay {
            description: self.description.clone(),
            temperature: format_temperature(self.temperature_c),
            feels_like: format_temperature(self.feels_like_c),
            humidity: self
                .humidity_pct
                .filter(|value| value.is_finite())
                .map_or_else(|| PLACEHOLDER.to_owned(), |value| format!("{value:.0}%")),
            wind: self
                .wind_speed_ms
                .filter(|value| value.is_finite())
                .map_or_else(|| PLACEHOLDER.to_owned(), |value| format!("{value:.1} m/s")),
            icon_url: self
                .icon
                .as_deref()
                .filter(|icon| !icon.is_empty())
                .map(|icon| format!("{ICON_URL_PREFIX}{icon}@2x.png")),
        }
    }
}

fn format_temperature(value: Option<f64>) -> String {
    value
        .filter(|value| value.is_finite())
        .map_or_else(|| PLACEHOLDER.to_owned(), |value| format!("{value:.1}°C"))
}

/// Display strings derived from a [`WeatherSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherDisplay {
    /// Condition description.
    pub description: String,
    /// Temperature, e.g. `31.2°C`, or `--`.
    pub temperature: String,
    /// Feels-like temperature, or `--`.
    pub feels_like: String,
    /// Humidity, e.g. `74%`, or `--`.
    pub humidity: String,
    /// Wind speed, e.g. `3.6 m/s`, or `--`.
    pub wind: String,
    /// Icon image URL when the provider sent an icon.
    pub icon_url: Option<String>,
}

/// Map marker combining the selected location with its weather.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherMarker {
    /// Marker latitude (the selected location).
    pub lat: f64,
    /// Marker longitude (the selected location).
    pub lon: f64,
    /// Provider place name, falling back to the location name.
    pub name: String,
    /// Derived display strings.
    pub display: WeatherDisplay,
}

impl WeatherMarker {
    /// Build a marker for `location` from `snapshot`.
    pub fn new(location: &ResolvedLocation, snapshot: &WeatherSnapshot) -> Self {
        let name = snapshot
            .place_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| location.name())
            .to_owned();
        Self {
            lat: location.lat(),
            lon: location.lon(),
            name,
            display: snapshot.display(),
        }
    }
}
