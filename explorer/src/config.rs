//! Environment-driven configuration.
//!
//! Everything is read through [`mockable::Env`] so tests can substitute a
//! `MockEnv`. Endpoint, locale and timeout values are validated here; missing
//! identity keys are not an error and only disable sign-in and translation.

use std::time::Duration;

use mockable::{DefaultEnv, Env};
use url::Url;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::localization::{Locale, LocaleParseError};

const LOCALE_ENV: &str = "EXPLORER_LOCALE";
const COUNTRY_CODES_ENV: &str = "EXPLORER_COUNTRY_CODES";
const NOMINATIM_URL_ENV: &str = "EXPLORER_NOMINATIM_URL";
const OVERPASS_URL_ENV: &str = "EXPLORER_OVERPASS_URL";
const OPENWEATHER_URL_ENV: &str = "EXPLORER_OPENWEATHER_URL";
const MYMEMORY_URL_ENV: &str = "EXPLORER_MYMEMORY_URL";
const USER_AGENT_ENV: &str = "EXPLORER_USER_AGENT";
const HTTP_TIMEOUT_ENV: &str = "EXPLORER_HTTP_TIMEOUT_SECS";
const OPENWEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_COUNTRY_CODES: &str = "vn";
const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";
const DEFAULT_USER_AGENT: &str = "VietnamMapApp/1.0";

const FIREBASE_API_KEY_ENV: &str = "FIREBASE_API_KEY";
const FIREBASE_AUTH_DOMAIN_ENV: &str = "FIREBASE_AUTH_DOMAIN";
const FIREBASE_PROJECT_ID_ENV: &str = "FIREBASE_PROJECT_ID";
const FIREBASE_STORAGE_BUCKET_ENV: &str = "FIREBASE_STORAGE_BUCKET";
const FIREBASE_MESSAGING_SENDER_ID_ENV: &str = "FIREBASE_MESSAGING_SENDER_ID";
const FIREBASE_APP_ID_ENV: &str = "FIREBASE_APP_ID";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An endpoint variable is not an absolute http(s) URL.
    #[error("invalid URL for {name}='{value}': {reason}")]
    InvalidUrl {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
        /// Parser or scheme diagnostic.
        reason: String,
    },
    /// The locale variable names an unsupported locale.
    #[error("invalid value for {LOCALE_ENV}: {source}")]
    InvalidLocale {
        /// Locale parse failure.
        #[source]
        source: LocaleParseError,
    },
    /// The timeout variable is not a positive whole number of seconds.
    #[error("invalid value for {HTTP_TIMEOUT_ENV}='{value}'; expected a positive integer")]
    InvalidTimeout {
        /// Rejected value.
        value: String,
    },
}

/// Provider endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSettings {
    /// Nominatim search endpoint.
    pub nominatim: Url,
    /// Overpass interpreter endpoint.
    pub overpass: Url,
    /// OpenWeather current-conditions endpoint.
    pub openweather: Url,
    /// MyMemory translation endpoint.
    pub mymemory: Url,
}

/// Shared HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// `User-Agent` header sent to every provider.
    pub user_agent: String,
    /// Per-request timeout; `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

/// Identity provider settings; present only when every key is set.
pub struct FirebaseSettings {
    /// Web API key.
    pub api_key: Zeroizing<String>,
    /// Auth domain.
    pub auth_domain: String,
    /// Project identifier.
    pub project_id: String,
    /// Storage bucket.
    pub storage_bucket: String,
    /// Messaging sender identifier.
    pub messaging_sender_id: String,
    /// App identifier.
    pub app_id: String,
}

impl std::fmt::Debug for FirebaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseSettings")
            .field("api_key", &"<redacted>")
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Complete runtime configuration.
#[derive(Debug)]
pub struct ExplorerConfig {
    /// Locale for user-facing copy and weather descriptions.
    pub locale: Locale,
    /// ISO country filter passed to the geocoder.
    pub country_codes: String,
    /// Provider endpoints.
    pub endpoints: EndpointSettings,
    /// Shared HTTP client settings.
    pub http: HttpSettings,
    /// OpenWeather API key, when provided.
    pub openweather_api_key: Option<Zeroizing<String>>,
    /// Identity settings; `None` disables sign-in and translation.
    pub firebase: Option<FirebaseSettings>,
}

impl ExplorerConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ExplorerConfig::from_env_with`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(&DefaultEnv::new())
    }

    /// Read configuration through `env`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use explorer::ExplorerConfig;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "EXPLORER_LOCALE" => Some("en".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let config = ExplorerConfig::from_env_with(&env).expect("valid configuration");
    /// assert_eq!(config.locale.code(), "en");
    /// assert!(config.firebase.is_none());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparsable endpoint URL, locale or
    /// timeout.
    pub fn from_env_with<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let locale = match non_blank(env, LOCALE_ENV) {
            Some(value) => value
                .parse()
                .map_err(|source| ConfigError::InvalidLocale { source })?,
            None => Locale::default(),
        };

        Ok(Self {
            locale,
            country_codes: non_blank(env, COUNTRY_CODES_ENV)
                .unwrap_or_else(|| DEFAULT_COUNTRY_CODES.to_owned()),
            endpoints: EndpointSettings {
                nominatim: endpoint(env, NOMINATIM_URL_ENV, DEFAULT_NOMINATIM_URL)?,
                overpass: endpoint(env, OVERPASS_URL_ENV, DEFAULT_OVERPASS_URL)?,
                openweather: endpoint(env, OPENWEATHER_URL_ENV, DEFAULT_OPENWEATHER_URL)?,
                mymemory: endpoint(env, MYMEMORY_URL_ENV, DEFAULT_MYMEMORY_URL)?,
            },
            http: HttpSettings {
                user_agent: non_blank(env, USER_AGENT_ENV)
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
                timeout: timeout(env)?,
            },
            openweather_api_key: non_blank(env, OPENWEATHER_API_KEY_ENV).map(Zeroizing::new),
            firebase: firebase(env),
        })
    }

    /// Whether identity settings are complete.
    pub fn identity_configured(&self) -> bool {
        self.firebase.is_some()
    }
}

fn non_blank<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn endpoint<E: Env>(env: &E, name: &'static str, default: &str) -> Result<Url, ConfigError> {
    let value = non_blank(env, name).unwrap_or_else(|| default.to_owned());
    let url = Url::parse(&value).map_err(|error| ConfigError::InvalidUrl {
        name,
        value: value.clone(),
        reason: error.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            name,
            value,
            reason: "scheme must be http or https".to_owned(),
        });
    }
    Ok(url)
}

fn timeout<E: Env>(env: &E) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = non_blank(env, HTTP_TIMEOUT_ENV) else {
        return Ok(None);
    };
    match value.parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Some(Duration::from_secs(seconds))),
        _ => Err(ConfigError::InvalidTimeout { value }),
    }
}

fn firebase<E: Env>(env: &E) -> Option<FirebaseSettings> {
    let names = [
        FIREBASE_API_KEY_ENV,
        FIREBASE_AUTH_DOMAIN_ENV,
        FIREBASE_PROJECT_ID_ENV,
        FIREBASE_STORAGE_BUCKET_ENV,
        FIREBASE_MESSAGING_SENDER_ID_ENV,
        FIREBASE_APP_ID_ENV,
    ];
    let values = names.map(|name| non_blank(env, name));
    let missing: Vec<&str> = names
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        warn!(
            missing = ?missing,
            "identity configuration incomplete; sign-in and translation are disabled"
        );
        return None;
    }

    let [
        Some(api_key),
        Some(auth_domain),
        Some(project_id),
        Some(storage_bucket),
        Some(messaging_sender_id),
        Some(app_id),
    ] = values
    else {
        return None;
    };
    Some(FirebaseSettings {
        api_key: Zeroizing::new(api_key),
        auth_domain,
        project_id,
        storage_bucket,
        messaging_sender_id,
        app_id,
    })
}

#[cfg(test)]
mod tests;
