//! DTOs for the MyMemory `/get` payload.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TranslationResponseDto {
    #[serde(default)]
    pub(super) response_data: Option<ResponseDataDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResponseDataDto {
    #[serde(default)]
    pub(super) translated_text: Option<String>,
}

impl TranslationResponseDto {
    pub(super) fn into_translation(self) -> Result<String, String> {
        self.response_data
            .and_then(|data| data.translated_text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| "response is missing responseData.translatedText".to_owned())
    }
}
