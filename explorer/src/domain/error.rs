//! Lane-level error kinds.
//!
//! Each lane (search, weather, translation, auth) owns its own error enum so a
//! failure in one lane can never be written into another. `Display` carries a
//! diagnostic English description; `message` returns the localised copy shown
//! to users.

use super::auth_session::{AuthAction, ProviderErrorCode};
use super::localization::{Locale, MessageKey, error_code_suffix, localize};

/// Errors surfaced in the search lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The submitted query was empty or whitespace only.
    #[error("search query must not be blank")]
    Validation,
    /// The geocoder returned no match or failed.
    #[error("no location matched the query")]
    LocationNotFound,
    /// The POI stage failed after a successful geocode.
    #[error("point of interest lookup failed")]
    SearchFailed,
}

impl SearchError {
    /// Localised copy for this error.
    pub fn message(self, locale: Locale) -> &'static str {
        let key = match self {
            Self::Validation => MessageKey::EmptyQuery,
            Self::LocationNotFound => MessageKey::LocationNotFound,
            Self::SearchFailed => MessageKey::SearchFailed,
        };
        localize(key, locale)
    }
}

/// Errors surfaced in the weather lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WeatherError {
    /// The current-conditions lookup failed.
    #[error("current weather is unavailable")]
    Unavailable,
}

impl WeatherError {
    /// Localised copy for this error.
    pub fn message(self, locale: Locale) -> &'static str {
        match self {
            Self::Unavailable => localize(MessageKey::WeatherUnavailable, locale),
        }
    }
}

/// Errors surfaced in the translation lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// Identity configuration is absent, so translation is disabled.
    #[error("translation requires identity configuration")]
    ConfigurationMissing,
    /// The session is not signed in.
    #[error("translation requires a signed-in session")]
    SignInRequired,
    /// The source text was blank.
    #[error("translation text must not be blank")]
    Validation,
    /// The translator failed; the cause is only logged.
    #[error("translation provider failed")]
    Unavailable,
}

impl TranslateError {
    /// Localised copy for this error.
    pub fn message(self, locale: Locale) -> &'static str {
        let key = match self {
            Self::ConfigurationMissing => MessageKey::TranslationConfigurationMissing,
            Self::SignInRequired => MessageKey::TranslationSignInRequired,
            Self::Validation => MessageKey::TranslationEmpty,
            Self::Unavailable => MessageKey::TranslationUnavailable,
        };
        localize(key, locale)
    }
}

/// Errors surfaced by the auth session manager.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Identity configuration is absent; the action was rejected locally.
    #[error("identity provider is not configured ({action})")]
    ConfigurationMissing {
        /// Action that was attempted.
        action: AuthAction,
    },
    /// The identity provider rejected the action.
    #[error("identity provider error: {code}")]
    Provider {
        /// Provider error code.
        code: ProviderErrorCode,
    },
}

impl AuthError {
    /// Localised copy for this error, including the provider code suffix.
    pub fn message(&self, locale: Locale) -> String {
        match self {
            Self::ConfigurationMissing {
                action: AuthAction::SignIn,
            } => localize(MessageKey::SignInConfigurationMissing, locale).to_owned(),
            Self::ConfigurationMissing {
                action: AuthAction::SignOut,
            } => localize(MessageKey::SignOutConfigurationMissing, locale).to_owned(),
            Self::Provider { code } => format!(
                "{}{}",
                localize(code.message_key(), locale),
                error_code_suffix(code.as_str(), locale)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for localised error copy.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SearchError::Validation, "Vui lòng nhập tên địa điểm")]
    #[case(SearchError::LocationNotFound, "Không tìm thấy địa điểm. Vui lòng thử lại.")]
    #[case(
        SearchError::SearchFailed,
        "Đã xảy ra lỗi khi tìm kiếm. Vui lòng thử lại."
    )]
    fn search_errors_use_vietnamese_copy(#[case] error: SearchError, #[case] expected: &str) {
        assert_eq!(error.message(Locale::Vietnamese), expected);
    }

    #[rstest]
    fn provider_errors_keep_raw_code() {
        let error = AuthError::Provider {
            code: ProviderErrorCode::from("auth/popup-blocked"),
        };
        assert_eq!(
            error.message(Locale::Vietnamese),
            "Trình duyệt đã chặn popup. Hãy bật popup cho trang này. (mã: auth/popup-blocked)"
        );
    }

    #[rstest]
    fn unknown_provider_codes_fall_back_to_generic_copy() {
        let error = AuthError::Provider {
            code: ProviderErrorCode::from("auth/internal-error"),
        };
        assert_eq!(
            error.message(Locale::English),
            "Could not sign in with Google. Please try again. (code: auth/internal-error)"
        );
    }

    #[rstest]
    fn configuration_errors_distinguish_actions() {
        let sign_in = AuthError::ConfigurationMissing {
            action: AuthAction::SignIn,
        };
        let sign_out = AuthError::ConfigurationMissing {
            action: AuthAction::SignOut,
        };
        assert_ne!(
            sign_in.message(Locale::Vietnamese),
            sign_out.message(Locale::Vietnamese)
        );
    }
}
