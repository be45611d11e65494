//! Outbound adapters for the domain ports.
//!
//! Each provider lives in its own module with a DTO file for the response
//! shape and an `http_source` file holding the reqwest adapter.

pub mod http_support;
pub mod mymemory;
pub mod nominatim;
pub mod openweather;
pub mod overpass;

pub use mymemory::MyMemoryHttpTranslator;
pub use nominatim::NominatimHttpGeocoder;
pub use openweather::OpenWeatherHttpSource;
pub use overpass::OverpassHttpPoiSource;
