//! Reqwest-backed Nominatim geocoder.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::NominatimPlaceDto;
use crate::domain::ports::{GeocodeMatch, GeocodeRequest, Geocoder, GeocoderError};
use crate::outbound::http_support::status_message;

/// Geocoder issuing `GET /search` requests against one Nominatim endpoint.
pub struct NominatimHttpGeocoder {
    client: Client,
    endpoint: Url,
}

impl NominatimHttpGeocoder {
    /// Create an adapter over a shared client.
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl Geocoder for NominatimHttpGeocoder {
    async fn geocode(&self, request: &GeocodeRequest) -> Result<Vec<GeocodeMatch>, GeocoderError> {
        let limit = request.limit.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query_params(request, &limit))
            .send()
            .await
            .map_err(|error| GeocoderError::transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| GeocoderError::transport(error.to_string()))?;
        if !status.is_success() {
            return Err(GeocoderError::status(status_message(status, body.as_ref())));
        }
        parse_matches(body.as_ref())
    }
}

fn query_params<'a>(request: &'a GeocodeRequest, limit: &'a str) -> Vec<(&'static str, &'a str)> {
    let mut params = vec![
        ("q", request.query.as_str()),
        ("format", "jsonv2"),
        ("limit", limit),
    ];
    if !request.country_codes.trim().is_empty() {
        params.push(("countrycodes", request.country_codes.as_str()));
    }
    params
}

fn parse_matches(body: &[u8]) -> Result<Vec<GeocodeMatch>, GeocoderError> {
    let places: Vec<NominatimPlaceDto> = serde_json::from_slice(body).map_err(|error| {
        GeocoderError::decode(format!("invalid Nominatim JSON payload: {error}"))
    })?;
    places
        .into_iter()
        .map(NominatimPlaceDto::into_domain_match)
        .collect::<Result<Vec<_>, _>>()
        .map_err(GeocoderError::decode)
}

#[cfg(test)]
mod tests {
    //! Coverage for Nominatim request shaping and response decoding.

    use super::*;
    use rstest::rstest;

    fn request(country_codes: &str) -> GeocodeRequest {
        GeocodeRequest {
            query: "Hoi An".to_owned(),
            country_codes: country_codes.to_owned(),
            limit: 1,
        }
    }

    #[rstest]
    fn params_carry_query_format_limit_and_country_filter() {
        let request = request("vn");
        let params = query_params(&request, "1");
        assert_eq!(
            params,
            vec![
                ("q", "Hoi An"),
                ("format", "jsonv2"),
                ("limit", "1"),
                ("countrycodes", "vn"),
            ]
        );
    }

    #[rstest]
    fn blank_country_filter_is_omitted() {
        let request = request(" ");
        assert!(
            query_params(&request, "1")
                .iter()
                .all(|(key, _)| *key != "countrycodes")
        );
    }

    #[rstest]
    fn parses_string_coordinates() {
        let body = br#"[{"lat":"15.8801","lon":"108.3380","display_name":"Hoi An, Quang Nam, Vietnam","type":"city"}]"#;
        let matches = parse_matches(body).expect("valid payload");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].lat, 15.8801);
        assert_eq!(matches[0].lon, 108.338);
        assert_eq!(
            matches[0].display_name.as_deref(),
            Some("Hoi An, Quang Nam, Vietnam")
        );
    }

    #[rstest]
    fn empty_array_is_no_match() {
        assert!(parse_matches(b"[]").expect("valid payload").is_empty());
    }

    #[rstest]
    #[case(br#"{"error":"bad"}"#.as_slice())]
    #[case(br#"[{"lat":"north","lon":"108.3"}]"#.as_slice())]
    #[case(br#"[{"lat":"NaN","lon":"108.3"}]"#.as_slice())]
    fn malformed_payloads_are_decode_errors(#[case] body: &[u8]) {
        let error = parse_matches(body).expect_err("decode fails");
        assert!(matches!(error, GeocoderError::Decode { .. }));
    }
}
