//! Points of interest shown around a resolved location.

use super::localization::{Locale, MessageKey, localize};
use super::ports::PoiFeature;

/// Maximum number of points of interest kept per search.
pub const MAX_POINTS_OF_INTEREST: usize = 5;

/// Tag keys checked, in priority order, when deriving a category.
const CATEGORY_TAG_PRIORITY: [&str; 4] = ["tourism", "amenity", "shop", "historic"];

/// A displayable point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    /// Provider identifier, unique within one batch.
    pub id: i64,
    /// Latitude in WGS84.
    pub lat: f64,
    /// Longitude in WGS84.
    pub lon: f64,
    /// `name` tag, or the localised "unnamed" label.
    pub name: String,
    /// Value of the first present category tag, or a generic label.
    pub category: String,
}

impl PointOfInterest {
    /// Map a raw provider feature into a point of interest.
    pub fn from_feature(feature: PoiFeature, locale: Locale) -> Self {
        let name = feature
            .tags
            .get("name")
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| localize(MessageKey::UnnamedPoi, locale).to_owned());
        let category = CATEGORY_TAG_PRIORITY
            .iter()
            .find_map(|key| feature.tags.get(*key).filter(|value| !value.is_empty()))
            .cloned()
            .unwrap_or_else(|| localize(MessageKey::GenericPoiCategory, locale).to_owned());

        Self {
            id: feature.id,
            lat: feature.lat,
            lon: feature.lon,
            name,
            category,
        }
    }
}

/// Map one provider batch, keeping the first [`MAX_POINTS_OF_INTEREST`] in
/// provider order.
pub fn select_points_of_interest(features: Vec<PoiFeature>, locale: Locale) -> Vec<PointOfInterest> {
    features
        .into_iter()
        .take(MAX_POINTS_OF_INTEREST)
        .map(|feature| PointOfInterest::from_feature(feature, locale))
        .collect()
}

#[cfg(test)]
mod tests {
    //! Unit tests for feature mapping and batch truncation.

    use std::collections::BTreeMap;

    use super::*;
    use rstest::rstest;

    fn feature(id: i64, tags: &[(&str, &str)]) -> PoiFeature {
        PoiFeature {
            id,
            lat: 15.88,
            lon: 108.33,
            tags: tags
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[rstest]
    #[case(&[("tourism", "museum"), ("amenity", "cafe")], "museum")]
    #[case(&[("amenity", "cafe"), ("shop", "bakery")], "cafe")]
    #[case(&[("shop", "bakery"), ("historic", "ruins")], "bakery")]
    #[case(&[("historic", "ruins")], "ruins")]
    #[case(&[("leisure", "park")], "Điểm quan tâm")]
    fn category_follows_tag_priority(#[case] tags: &[(&str, &str)], #[case] expected: &str) {
        let poi = PointOfInterest::from_feature(feature(1, tags), Locale::Vietnamese);
        assert_eq!(poi.category, expected);
    }

    #[rstest]
    fn missing_name_uses_localised_label() {
        let poi = PointOfInterest::from_feature(feature(7, &[("shop", "tailor")]), Locale::English);
        assert_eq!(poi.name, "Unnamed");

        let named = PointOfInterest::from_feature(
            feature(8, &[("name", "Chùa Cầu"), ("historic", "bridge")]),
            Locale::Vietnamese,
        );
        assert_eq!(named.name, "Chùa Cầu");
    }

    #[rstest]
    fn batch_keeps_first_five_in_provider_order() {
        let features = (1..=9).map(|id| feature(id, &[("shop", "x")])).collect();
        let pois = select_points_of_interest(features, Locale::Vietnamese);
        let ids: Vec<i64> = pois.iter().map(|poi| poi.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[rstest]
    fn short_batches_are_kept_whole() {
        let features = vec![feature(3, &[]), feature(1, &[])];
        let pois = select_points_of_interest(features, Locale::Vietnamese);
        assert_eq!(pois.len(), 2);
        assert_eq!(pois[0].id, 3);
    }
}
