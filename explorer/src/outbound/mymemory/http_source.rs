//! Reqwest-backed MyMemory translator.

use async_trait::async_trait;
use reqwest::{Client, Url};

use super::dto::TranslationResponseDto;
use crate::domain::ports::{TranslationRequest, Translator, TranslatorError};
use crate::outbound::http_support::status_message;

/// Translator issuing `GET /get?q=..&langpair=..` requests.
pub struct MyMemoryHttpTranslator {
    client: Client,
    endpoint: Url,
}

impl MyMemoryHttpTranslator {
    /// Create an adapter over a shared client.
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl Translator for MyMemoryHttpTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslatorError> {
        let langpair = request.languages.as_langpair();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", request.text.as_str()), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|error| TranslatorError::transport(error.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| TranslatorError::transport(error.to_string()))?;
        if !status.is_success() {
            return Err(TranslatorError::status(status_message(status, body.as_ref())));
        }
        parse_translation(body.as_ref())
    }
}

fn parse_translation(body: &[u8]) -> Result<String, TranslatorError> {
    let decoded: TranslationResponseDto = serde_json::from_slice(body).map_err(|error| {
        TranslatorError::decode(format!("invalid MyMemory JSON payload: {error}"))
    })?;
    decoded.into_translation().map_err(TranslatorError::decode)
}

#[cfg(test)]
mod tests {
    //! Coverage for MyMemory payload decoding.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn extracts_translated_text() {
        let body = r#"{"responseData":{"translatedText":"Xin chào","match":1},"responseStatus":200}"#;
        assert_eq!(
            parse_translation(body.as_bytes()).expect("valid payload"),
            "Xin chào"
        );
    }

    #[rstest]
    #[case(br#"{"responseStatus":403}"#.as_slice())]
    #[case(br#"{"responseData":{}}"#.as_slice())]
    #[case(br#"{"responseData":{"translatedText":"  "}}"#.as_slice())]
    #[case(b"not json".as_slice())]
    fn unusable_payloads_are_decode_errors(#[case] body: &[u8]) {
        let error = parse_translation(body).expect_err("decode fails");
        assert!(matches!(error, TranslatorError::Decode { .. }));
    }
}
