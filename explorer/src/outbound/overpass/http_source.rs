//! Reqwest-backed Overpass source adapter.
//!
//! This adapter owns transport details only: query text, HTTP error mapping
//! and JSON decoding into raw features.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::OverpassResponseDto;
use crate::domain::location::validate_coordinate;
use crate::domain::ports::{PoiFeature, PoiRequest, PoiSource, PoiSourceError};
use crate::outbound::http_support::status_message;

/// POI source that performs HTTP POST requests against one Overpass endpoint.
pub struct OverpassHttpPoiSource {
    client: Client,
    endpoint: Url,
}

impl OverpassHttpPoiSource {
    /// Create an adapter over a shared client.
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl PoiSource for OverpassHttpPoiSource {
    async fn fetch_features(&self, request: &PoiRequest) -> Result<Vec<PoiFeature>, PoiSourceError> {
        let query = build_overpass_query(request)?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|error| PoiSourceError::transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| PoiSourceError::transport(error.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_features(body.as_ref())
    }
}

fn parse_features(body: &[u8]) -> Result<Vec<PoiFeature>, PoiSourceError> {
    let decoded: OverpassResponseDto = serde_json::from_slice(body).map_err(|error| {
        PoiSourceError::decode(format!("invalid Overpass JSON payload: {error}"))
    })?;
    decoded
        .into_domain_features()
        .map_err(PoiSourceError::decode)
}

fn build_overpass_query(request: &PoiRequest) -> Result<String, PoiSourceError> {
    validate_coordinate(request.lat, request.lon)
        .map_err(|error| PoiSourceError::invalid_request(error.to_string()))?;
    if request.tags.is_empty() {
        return Err(PoiSourceError::invalid_request(
            "at least one tag selector is required",
        ));
    }

    let around = format!(
        "(around:{radius},{lat},{lon})",
        radius = request.radius_metres,
        lat = request.lat,
        lon = request.lon,
    );
    let lines = request
        .tags
        .iter()
        .map(|tag| build_tag_selector(tag).map(|selector| format!("  node{selector}{around};")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(
        "[out:json];\n(\n{query_lines}\n);\nout body {limit};",
        query_lines = lines.join("\n"),
        limit = request.limit,
    ))
}

fn build_tag_selector(tag: &str) -> Result<String, PoiSourceError> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(PoiSourceError::invalid_request(
            "tags must not include blank values",
        ));
    }

    let (key, maybe_value) = match trimmed.split_once('=') {
        Some((key, value)) => (key.trim(), Some(value.trim())),
        None => (trimmed, None),
    };
    if key.is_empty() {
        return Err(PoiSourceError::invalid_request(
            "tags must provide a non-empty key",
        ));
    }

    let escaped_key = escape_quoted(key);
    match maybe_value {
        Some("") => Err(PoiSourceError::invalid_request(
            "tags must not include empty values",
        )),
        Some(value) => Ok(format!("[\"{escaped_key}\"=\"{}\"]", escape_quoted(value))),
        None => Ok(format!("[\"{escaped_key}\"]")),
    }
}

fn escape_quoted(raw: &str) -> String {
    raw.replace('\\', r"\\").replace('"', "\\\"")
}

fn map_status_error(status: StatusCode, body: &[u8]) -> PoiSourceError {
    let message = status_message(status, body);
    if status == StatusCode::BAD_REQUEST {
        PoiSourceError::invalid_request(message)
    } else {
        PoiSourceError::status(message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network Overpass helpers.

    use super::*;
    use crate::domain::ports::{POI_SEARCH_RADIUS_METRES, POI_TAG_SELECTORS};
    use rstest::rstest;

    fn request(tags: &[&str]) -> PoiRequest {
        PoiRequest {
            lat: 15.8801,
            lon: 108.338,
            radius_metres: POI_SEARCH_RADIUS_METRES,
            tags: tags.iter().map(|tag| (*tag).to_owned()).collect(),
            limit: 5,
        }
    }

    #[test]
    fn builds_around_query_for_every_selector() {
        let query = build_overpass_query(&request(&POI_TAG_SELECTORS)).expect("query should build");

        assert!(query.starts_with("[out:json];"));
        assert!(query.contains("node[\"tourism\"](around:2000,15.8801,108.338);"));
        assert!(query.contains("node[\"amenity\"=\"restaurant\"](around:2000,15.8801,108.338);"));
        assert!(query.contains("node[\"amenity\"=\"cafe\"](around:2000,15.8801,108.338);"));
        assert!(query.contains("node[\"historic\"](around:2000,15.8801,108.338);"));
        assert!(query.ends_with("out body 5;"));
    }

    #[test]
    fn escapes_quoted_values() {
        let query = build_overpass_query(&request(&["name=coffee \"bar\""])).expect("query builds");
        assert!(query.contains("node[\"name\"=\"coffee \\\"bar\\\"\"]"));
    }

    #[rstest]
    #[case(&[" "])]
    #[case(&["=cafe"])]
    #[case(&["amenity="])]
    #[case(&[])]
    fn rejects_unusable_selectors(#[case] tags: &[&str]) {
        let error = build_overpass_query(&request(tags)).expect_err("query must fail");
        assert!(matches!(error, PoiSourceError::InvalidRequest { .. }));
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let mut request = request(&["shop"]);
        request.lat = 91.0;
        let error = build_overpass_query(&request).expect_err("query must fail");
        assert!(matches!(error, PoiSourceError::InvalidRequest { .. }));
    }

    #[rstest]
    #[case::bad_request(StatusCode::BAD_REQUEST, true)]
    #[case::rate_limited(StatusCode::TOO_MANY_REQUESTS, false)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, false)]
    fn maps_http_statuses(#[case] status: StatusCode, #[case] invalid_request: bool) {
        let error = map_status_error(status, b"{\"remark\":\"runtime error\"}");
        assert_eq!(
            matches!(error, PoiSourceError::InvalidRequest { .. }),
            invalid_request
        );
        assert!(error.to_string().contains(&status.as_u16().to_string()));
    }

    #[test]
    fn parses_elements_with_tags() {
        let body = r#"{
            "elements": [
                { "type": "node", "id": 101, "lat": 15.877, "lon": 108.326,
                  "tags": { "name": "Chùa Cầu", "tourism": "attraction" } },
                { "type": "node", "id": 102, "lat": 15.878, "lon": 108.327 }
            ]
        }"#;

        let features = parse_features(body.as_bytes()).expect("JSON should decode");
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].tags.get("name").map(String::as_str), Some("Chùa Cầu"));
        assert!(features[1].tags.is_empty());
    }

    #[test]
    fn rejects_elements_without_coordinates() {
        let body = r#"{ "elements": [ { "type": "way", "id": 201 } ] }"#;
        let error = parse_features(body.as_bytes()).expect_err("decode should fail");
        assert!(matches!(error, PoiSourceError::Decode { .. }));
    }
}
