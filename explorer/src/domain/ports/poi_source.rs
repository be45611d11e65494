//! Driven port for fetching tagged features around a coordinate.
//!
//! The domain owns the request shape and the raw feature contract; mapping
//! features to displayable points of interest happens in the search service.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::define_port_error;

/// Search radius around the resolved location, in metres.
pub const POI_SEARCH_RADIUS_METRES: u32 = 2000;

/// Tag selectors queried around the resolved location.
pub const POI_TAG_SELECTORS: [&str; 5] = [
    "tourism",
    "amenity=restaurant",
    "amenity=cafe",
    "shop",
    "historic",
];

/// Domain-owned request passed to the POI adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiRequest {
    /// Center latitude in WGS84.
    pub lat: f64,
    /// Center longitude in WGS84.
    pub lon: f64,
    /// Radius around the center in metres.
    pub radius_metres: u32,
    /// `key` or `key=value` selectors; a feature matching any selector is
    /// returned.
    pub tags: Vec<String>,
    /// Maximum number of features the provider should emit.
    pub limit: usize,
}

/// One raw feature returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiFeature {
    /// Provider element identifier, unique within a batch.
    pub id: i64,
    /// Latitude in WGS84.
    pub lat: f64,
    /// Longitude in WGS84.
    pub lon: f64,
    /// Raw provider tags.
    pub tags: BTreeMap<String, String>,
}

define_port_error! {
    /// Errors surfaced while calling the POI provider.
    pub enum PoiSourceError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "poi transport failed: {message}",
        /// The provider answered with a non-success status.
        Status { message: String } =>
            "poi provider returned an error status: {message}",
        /// The provider response could not be decoded.
        Decode { message: String } =>
            "poi response decode failed: {message}",
        /// Adapter rejected the request before execution.
        InvalidRequest { message: String } =>
            "poi request invalid: {message}",
    }
}

/// Port for querying nearby tagged features.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PoiSource: Send + Sync {
    /// Fetch features around the requested coordinate in provider order.
    async fn fetch_features(&self, request: &PoiRequest) -> Result<Vec<PoiFeature>, PoiSourceError>;
}
