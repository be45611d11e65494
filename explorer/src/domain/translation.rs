//! Translation inputs and results.

/// Non-blank text submitted for translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationText(String);

impl TranslationText {
    /// Validate raw input. Returns `None` for blank text.
    ///
    /// The text is kept as entered; only the blank check trims.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_owned()))
        }
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Outcome of the most recent successful translate action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Text the user submitted.
    pub source_text: String,
    /// Provider translation.
    pub translated_text: String,
}
