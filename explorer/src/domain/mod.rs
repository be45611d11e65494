//! Domain primitives, services and ports.
//!
//! Purpose: keep the search, translation and session rules independent of
//! transport. Services talk to providers only through the traits in
//! [`ports`] and write results into the [`ViewStore`].
//!
//! Public surface:
//! - `SearchService`: geocode → POI → weather orchestration.
//! - `TranslationService`: gated translate action.
//! - `AuthSessionManager`: session state machine over an identity provider.
//! - `ViewStore` / `ViewState`: the lane-partitioned state bag.

pub mod auth_session;
pub mod error;
pub mod localization;
pub mod location;
pub mod poi;
pub mod ports;
pub mod search_service;
pub mod translation;
pub mod translation_service;
pub mod view_state;
pub mod weather;

pub use self::auth_session::{
    AuthAction, AuthSession, AuthSessionManager, AuthSnapshot, ProviderErrorCode, UserProfile,
};
pub use self::error::{AuthError, SearchError, TranslateError, WeatherError};
pub use self::localization::{Locale, LocaleParseError};
pub use self::location::{
    DEFAULT_CENTER, DEFAULT_ZOOM, FOLLOW_UP_ZOOM, LocationValidationError, MapViewport,
    ResolvedLocation, SearchQuery,
};
pub use self::poi::{MAX_POINTS_OF_INTEREST, PointOfInterest};
pub use self::search_service::{SearchPorts, SearchService};
pub use self::translation::{TranslationResult, TranslationText};
pub use self::translation_service::TranslationService;
pub use self::view_state::{
    Generation, Lane, SearchLane, TranslationLane, ViewState, ViewStore, WeatherLane,
};
pub use self::weather::{WeatherDisplay, WeatherMarker, WeatherSnapshot};
