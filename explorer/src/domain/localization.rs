//! Localised user-facing copy.
//!
//! Every message shown to a user is looked up here by [`MessageKey`] so the
//! services only deal in typed error kinds. Vietnamese is the default locale;
//! English is carried for diagnostics and non-Vietnamese hosts.

use std::fmt;
use std::str::FromStr;

/// Locale used for user-facing copy and provider language hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// Vietnamese (`vi`).
    #[default]
    Vietnamese,
    /// English (`en`).
    English,
}

impl Locale {
    /// Two-letter language code sent to providers.
    pub fn code(self) -> &'static str {
        match self {
            Self::Vietnamese => "vi",
            Self::English => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a locale code is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{value}'; expected vi|en")]
pub struct LocaleParseError {
    /// Rejected input.
    pub value: String,
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vi" | "vi-vn" => Ok(Self::Vietnamese),
            "en" | "en-us" | "en-gb" => Ok(Self::English),
            _ => Err(LocaleParseError {
                value: value.to_owned(),
            }),
        }
    }
}

/// Catalogue entries for fixed user-facing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    /// Search submitted with a blank query.
    EmptyQuery,
    /// Geocoder found no match for the query.
    LocationNotFound,
    /// Points of interest could not be loaded.
    SearchFailed,
    /// Current weather could not be loaded.
    WeatherUnavailable,
    /// Translate pressed without identity configuration.
    TranslationConfigurationMissing,
    /// Translate pressed while signed out.
    TranslationSignInRequired,
    /// Translate pressed with blank text.
    TranslationEmpty,
    /// Translator failed or returned nothing.
    TranslationUnavailable,
    /// Sign-in attempted without identity configuration.
    SignInConfigurationMissing,
    /// Sign-out attempted without identity configuration.
    SignOutConfigurationMissing,
    /// `auth/popup-blocked`
    AuthPopupBlocked,
    /// `auth/popup-closed-by-user`
    AuthPopupClosed,
    /// `auth/cancelled-popup-request`
    AuthPopupPending,
    /// `auth/unauthorized-domain`
    AuthUnauthorizedDomain,
    /// `auth/invalid-oauth-client-id`
    AuthInvalidClientId,
    /// `auth/operation-not-supported-in-this-environment`
    AuthUnsupportedEnvironment,
    /// `auth/network-request-failed`
    AuthNetworkFailed,
    /// `auth/configuration-not-found`
    AuthProviderDisabled,
    /// Any other sign-in or sign-out failure.
    AuthGenericFailure,
    /// Name shown for a point of interest without one.
    UnnamedPoi,
    /// Category shown when no known tag is present.
    GenericPoiCategory,
    /// Shown while the first session change is pending.
    CheckingSession,
    /// Fallback for a user without a display name.
    DefaultDisplayName,
}

/// Look up the copy for `key` in `locale`.
pub fn localize(key: MessageKey, locale: Locale) -> &'static str {
    match locale {
        Locale::Vietnamese => vietnamese(key),
        Locale::English => english(key),
    }
}

/// Suffix appended to auth provider messages so the raw code stays visible.
pub fn error_code_suffix(code: &str, locale: Locale) -> String {
    if code.is_empty() {
        return String::new();
    }
    match locale {
        Locale::Vietnamese => format!(" (mã: {code})"),
        Locale::English => format!(" (code: {code})"),
    }
}

fn vietnamese(key: MessageKey) -> &'static str {
    match key {
        MessageKey::EmptyQuery => "Vui lòng nhập tên địa điểm",
        MessageKey::LocationNotFound => "Không tìm thấy địa điểm. Vui lòng thử lại.",
        MessageKey::SearchFailed => "Đã xảy ra lỗi khi tìm kiếm. Vui lòng thử lại.",
        MessageKey::WeatherUnavailable => "Không thể tải dữ liệu thời tiết lúc này.",
        MessageKey::TranslationConfigurationMissing => {
            "Chưa cấu hình Firebase. Vui lòng thêm FIREBASE_* và khởi động lại."
        }
        MessageKey::TranslationSignInRequired => {
            "Vui lòng đăng nhập bằng Google để sử dụng tính năng dịch."
        }
        MessageKey::TranslationEmpty => "Vui lòng nhập văn bản để dịch",
        MessageKey::TranslationUnavailable => "Không thể dịch văn bản. Vui lòng thử lại.",
        MessageKey::SignInConfigurationMissing => {
            "Chưa cấu hình Firebase. Thêm FIREBASE_* và khởi động lại."
        }
        MessageKey::SignOutConfigurationMissing => "Chưa cấu hình Firebase.",
        MessageKey::AuthPopupBlocked => {
            "Trình duyệt đã chặn popup. Hãy bật popup cho trang này."
        }
        MessageKey::AuthPopupClosed => "Cửa sổ đăng nhập đã bị đóng. Vui lòng thử lại.",
        MessageKey::AuthPopupPending => "Đang có phiên popup khác. Hãy thử lại.",
        MessageKey::AuthUnauthorizedDomain => {
            "Tên miền hiện tại chưa được thêm vào Authorized domains trong Firebase Auth."
        }
        MessageKey::AuthInvalidClientId => {
            "OAuth client ID không hợp lệ. Kiểm tra cấu hình Firebase."
        }
        MessageKey::AuthUnsupportedEnvironment => {
            "Môi trường không hỗ trợ popup. Thử dùng trình duyệt khác."
        }
        MessageKey::AuthNetworkFailed => {
            "Kết nối mạng gặp sự cố. Kiểm tra internet hoặc chặn popup/cookie."
        }
        MessageKey::AuthProviderDisabled => concat!(
            "Chưa bật Google trong Firebase Authentication. Vào Firebase Console → ",
            "Authentication → Sign-in method → bật Google và đặt email hỗ trợ."
        ),
        MessageKey::AuthGenericFailure => {
            "Không thể đăng nhập bằng Google. Vui lòng thử lại."
        }
        MessageKey::UnnamedPoi => "Không có tên",
        MessageKey::GenericPoiCategory => "Điểm quan tâm",
        MessageKey::CheckingSession => "Đang kiểm tra phiên đăng nhập...",
        MessageKey::DefaultDisplayName => "Người dùng",
    }
}

fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::EmptyQuery => "Please enter a place name",
        MessageKey::LocationNotFound => "Location not found. Please try again.",
        MessageKey::SearchFailed => "Something went wrong while searching. Please try again.",
        MessageKey::WeatherUnavailable => "Weather data is unavailable right now.",
        MessageKey::TranslationConfigurationMissing => {
            "Firebase is not configured. Set FIREBASE_* and restart."
        }
        MessageKey::TranslationSignInRequired => "Please sign in with Google to use translation.",
        MessageKey::TranslationEmpty => "Please enter text to translate",
        MessageKey::TranslationUnavailable => "Could not translate the text. Please try again.",
        MessageKey::SignInConfigurationMissing => {
            "Firebase is not configured. Add FIREBASE_* and restart."
        }
        MessageKey::SignOutConfigurationMissing => "Firebase is not configured.",
        MessageKey::AuthPopupBlocked => {
            "The browser blocked the popup. Allow popups for this page."
        }
        MessageKey::AuthPopupClosed => "The sign-in window was closed. Please try again.",
        MessageKey::AuthPopupPending => "Another sign-in popup is open. Please try again.",
        MessageKey::AuthUnauthorizedDomain => {
            "This domain is not listed under Authorized domains in Firebase Auth."
        }
        MessageKey::AuthInvalidClientId => {
            "The OAuth client ID is invalid. Check the Firebase configuration."
        }
        MessageKey::AuthUnsupportedEnvironment => {
            "This environment does not support popups. Try another browser."
        }
        MessageKey::AuthNetworkFailed => {
            "Network request failed. Check the connection or popup/cookie blockers."
        }
        MessageKey::AuthProviderDisabled => concat!(
            "Google sign-in is not enabled in Firebase Authentication. Open Firebase Console → ",
            "Authentication → Sign-in method, enable Google and set a support email."
        ),
        MessageKey::AuthGenericFailure => "Could not sign in with Google. Please try again.",
        MessageKey::UnnamedPoi => "Unnamed",
        MessageKey::GenericPoiCategory => "Point of interest",
        MessageKey::CheckingSession => "Checking session...",
        MessageKey::DefaultDisplayName => "User",
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for locale parsing and catalogue lookups.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("vi", Locale::Vietnamese)]
    #[case(" VI ", Locale::Vietnamese)]
    #[case("en", Locale::English)]
    #[case("en-GB", Locale::English)]
    fn parses_supported_locales(#[case] raw: &str, #[case] expected: Locale) {
        assert_eq!(raw.parse::<Locale>().expect("locale should parse"), expected);
    }

    #[rstest]
    fn rejects_unknown_locale() {
        let err = "fr".parse::<Locale>().expect_err("fr is not supported");
        assert_eq!(err.value, "fr");
    }

    #[rstest]
    fn code_suffix_is_empty_without_code() {
        assert_eq!(error_code_suffix("", Locale::Vietnamese), "");
        assert_eq!(
            error_code_suffix("auth/popup-blocked", Locale::Vietnamese),
            " (mã: auth/popup-blocked)"
        );
    }

    #[rstest]
    fn default_locale_is_vietnamese() {
        assert_eq!(
            localize(MessageKey::UnnamedPoi, Locale::default()),
            "Không có tên"
        );
    }
}
