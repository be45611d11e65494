//! Unit tests for configuration parsing.

use std::collections::HashMap;

use mockable::MockEnv;
use rstest::rstest;

use super::*;

fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn firebase_vars() -> Vec<(&'static str, &'static str)> {
    vec![
        (FIREBASE_API_KEY_ENV, "AIza-test"),
        (FIREBASE_AUTH_DOMAIN_ENV, "explorer.firebaseapp.com"),
        (FIREBASE_PROJECT_ID_ENV, "explorer"),
        (FIREBASE_STORAGE_BUCKET_ENV, "explorer.appspot.com"),
        (FIREBASE_MESSAGING_SENDER_ID_ENV, "1234"),
        (FIREBASE_APP_ID_ENV, "1:1234:web:abcd"),
    ]
}

#[rstest]
fn defaults_apply_when_unset() {
    let config = ExplorerConfig::from_env_with(&mock_env(&[])).expect("defaults are valid");

    assert_eq!(config.locale, Locale::Vietnamese);
    assert_eq!(config.country_codes, "vn");
    assert_eq!(config.http.user_agent, "VietnamMapApp/1.0");
    assert!(config.http.timeout.is_none());
    assert!(config.openweather_api_key.is_none());
    assert!(!config.identity_configured());
    assert_eq!(
        config.endpoints.nominatim.as_str(),
        "https://nominatim.openstreetmap.org/search"
    );
    assert_eq!(
        config.endpoints.mymemory.as_str(),
        "https://api.mymemory.translated.net/get"
    );
}

#[rstest]
fn overrides_are_honoured() {
    let env = mock_env(&[
        (LOCALE_ENV, "en-GB"),
        (COUNTRY_CODES_ENV, "vn,la"),
        (OVERPASS_URL_ENV, "http://localhost:8080/api/interpreter"),
        (HTTP_TIMEOUT_ENV, "15"),
        (OPENWEATHER_API_KEY_ENV, "owm-key"),
        (USER_AGENT_ENV, "explorer-tests/0.1"),
    ]);

    let config = ExplorerConfig::from_env_with(&env).expect("overrides are valid");

    assert_eq!(config.locale, Locale::English);
    assert_eq!(config.country_codes, "vn,la");
    assert_eq!(config.endpoints.overpass.port(), Some(8080));
    assert_eq!(config.http.timeout, Some(Duration::from_secs(15)));
    assert_eq!(config.http.user_agent, "explorer-tests/0.1");
    assert_eq!(
        config.openweather_api_key.as_deref().map(String::as_str),
        Some("owm-key")
    );
}

#[rstest]
fn complete_firebase_settings_enable_identity() {
    let config =
        ExplorerConfig::from_env_with(&mock_env(&firebase_vars())).expect("valid configuration");
    let firebase = config.firebase.as_ref().expect("identity configured");
    assert_eq!(firebase.project_id, "explorer");
    assert!(!format!("{firebase:?}").contains("AIza-test"));
}

#[rstest]
#[case(FIREBASE_API_KEY_ENV)]
#[case(FIREBASE_APP_ID_ENV)]
fn any_missing_firebase_key_disables_identity(#[case] dropped: &str) {
    let vars: Vec<_> = firebase_vars()
        .into_iter()
        .filter(|(name, _)| *name != dropped)
        .collect();
    let config = ExplorerConfig::from_env_with(&mock_env(&vars)).expect("valid configuration");
    assert!(!config.identity_configured());
}

#[rstest]
fn blank_firebase_value_counts_as_missing() {
    let vars: Vec<_> = firebase_vars()
        .into_iter()
        .map(|(name, value)| {
            if name == FIREBASE_PROJECT_ID_ENV {
                (name, "  ")
            } else {
                (name, value)
            }
        })
        .collect();
    let config = ExplorerConfig::from_env_with(&mock_env(&vars)).expect("valid configuration");
    assert!(!config.identity_configured());
}

#[rstest]
#[case(NOMINATIM_URL_ENV, "not a url")]
#[case(MYMEMORY_URL_ENV, "ftp://example.com/get")]
fn invalid_endpoints_are_rejected(#[case] name: &'static str, #[case] value: &str) {
    let error = ExplorerConfig::from_env_with(&mock_env(&[(name, value)]))
        .expect_err("endpoint must be rejected");
    assert!(matches!(error, ConfigError::InvalidUrl { name: rejected, .. } if rejected == name));
}

#[rstest]
fn unknown_locale_is_rejected() {
    let error = ExplorerConfig::from_env_with(&mock_env(&[(LOCALE_ENV, "fr")]))
        .expect_err("locale must be rejected");
    assert!(matches!(error, ConfigError::InvalidLocale { .. }));
}

#[rstest]
#[case("0")]
#[case("-3")]
#[case("soon")]
fn invalid_timeouts_are_rejected(#[case] value: &str) {
    let error = ExplorerConfig::from_env_with(&mock_env(&[(HTTP_TIMEOUT_ENV, value)]))
        .expect_err("timeout must be rejected");
    assert!(matches!(error, ConfigError::InvalidTimeout { .. }));
}
