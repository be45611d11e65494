//! DTOs for decoding Overpass JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! records (`PoiFeature`) in one pass.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::ports::PoiFeature;

#[derive(Debug, Deserialize)]
pub(super) struct OverpassResponseDto {
    #[serde(default)]
    pub(super) elements: Vec<OverpassElementDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct OverpassElementDto {
    pub(super) id: i64,
    pub(super) lat: Option<f64>,
    pub(super) lon: Option<f64>,
    #[serde(default)]
    pub(super) tags: BTreeMap<String, String>,
}

impl OverpassResponseDto {
    pub(super) fn into_domain_features(self) -> Result<Vec<PoiFeature>, String> {
        self.elements
            .into_iter()
            .map(OverpassElementDto::into_domain_feature)
            .collect()
    }
}

impl OverpassElementDto {
    fn into_domain_feature(self) -> Result<PoiFeature, String> {
        let (Some(lat), Some(lon)) = (self.lat, self.lon) else {
            return Err(format!("element {} missing coordinates", self.id));
        };
        if !lat.is_finite() || !lon.is_finite() {
            return Err(format!("element {} includes non-finite coordinates", self.id));
        }

        Ok(PoiFeature {
            id: self.id,
            lat,
            lon,
            tags: self.tags,
        })
    }
}
