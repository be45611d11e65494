//! OpenWeather current-conditions adapter.

mod dto;
mod http_source;

pub use http_source::OpenWeatherHttpSource;
