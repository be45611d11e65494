//! Driven port for text translation.

use async_trait::async_trait;

use super::define_port_error;

/// Source and target language codes for a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    /// Source language code.
    pub source: &'static str,
    /// Target language code.
    pub target: &'static str,
}

impl LanguagePair {
    /// English to Vietnamese, the only pair the translate action offers.
    pub const ENGLISH_TO_VIETNAMESE: Self = Self {
        source: "en",
        target: "vi",
    };

    /// Provider form `source|target`.
    pub fn as_langpair(self) -> String {
        format!("{}|{}", self.source, self.target)
    }
}

/// Domain-owned request passed to the translator adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Non-blank source text.
    pub text: String,
    /// Language pair.
    pub languages: LanguagePair,
}

define_port_error! {
    /// Errors surfaced while calling the translator.
    pub enum TranslatorError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "translator transport failed: {message}",
        /// The provider answered with a non-success status.
        Status { message: String } =>
            "translator returned an error status: {message}",
        /// The provider response lacked a usable translation.
        Decode { message: String } =>
            "translator response decode failed: {message}",
    }
}

/// Port for single-shot translation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate the request text, returning the translated text.
    async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslatorError>;
}

#[cfg(test)]
mod tests {
    //! Unit tests for language pair formatting.

    use super::*;

    #[test]
    fn english_to_vietnamese_uses_pipe_form() {
        assert_eq!(LanguagePair::ENGLISH_TO_VIETNAMESE.as_langpair(), "en|vi");
    }
}
