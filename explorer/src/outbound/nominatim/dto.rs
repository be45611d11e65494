//! DTOs for Nominatim `jsonv2` search results.
//!
//! Nominatim encodes coordinates as strings; they are parsed and checked for
//! finiteness while mapping into [`GeocodeMatch`].

use serde::Deserialize;

use crate::domain::ports::GeocodeMatch;

#[derive(Debug, Deserialize)]
pub(super) struct NominatimPlaceDto {
    pub(super) lat: String,
    pub(super) lon: String,
    #[serde(default)]
    pub(super) display_name: Option<String>,
}

impl NominatimPlaceDto {
    pub(super) fn into_domain_match(self) -> Result<GeocodeMatch, String> {
        let lat = parse_coordinate("lat", &self.lat)?;
        let lon = parse_coordinate("lon", &self.lon)?;
        Ok(GeocodeMatch {
            lat,
            lon,
            display_name: self.display_name,
        })
    }
}

fn parse_coordinate(field: &str, raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|error| format!("{field} `{raw}` is not a number: {error}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{field} `{raw}` is not finite"))
    }
}
