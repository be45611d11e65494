//! Search query, resolved location and map viewport primitives.

use std::fmt;

/// Map center shown before any search resolves (Da Nang).
pub const DEFAULT_CENTER: (f64, f64) = (16.0544, 108.2022);
/// Map zoom shown before any search resolves.
pub const DEFAULT_ZOOM: u8 = 13;
/// Zoom applied whenever a new location is resolved.
pub const FOLLOW_UP_ZOOM: u8 = 14;

/// A submitted, non-blank search query.
///
/// ## Invariants
/// - The trimmed text is non-empty.
/// - `raw()` keeps the text exactly as typed; it is used as the display-name
///   fallback when the geocoder returns no label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
}

impl SearchQuery {
    /// Validate raw input into a query. Returns `None` for blank input.
    ///
    /// # Examples
    /// ```
    /// use explorer::domain::SearchQuery;
    ///
    /// assert!(SearchQuery::parse("   ").is_none());
    /// let query = SearchQuery::parse(" Hoi An ").expect("non-blank query");
    /// assert_eq!(query.text(), "Hoi An");
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_owned(),
        })
    }

    /// Trimmed query text sent to the geocoder.
    pub fn text(&self) -> &str {
        self.raw.trim()
    }

    /// Query text exactly as entered.
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }
}

/// Validation errors raised by [`ResolvedLocation::new`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationValidationError {
    /// Latitude was outside `[-90, 90]` or not finite.
    #[error("latitude {value} must be within [-90, 90]")]
    Latitude {
        /// Rejected latitude.
        value: f64,
    },
    /// Longitude was outside `[-180, 180]` or not finite.
    #[error("longitude {value} must be within [-180, 180]")]
    Longitude {
        /// Rejected longitude.
        value: f64,
    },
}

/// Validate a WGS84 coordinate pair.
pub fn validate_coordinate(lat: f64, lon: f64) -> Result<(), LocationValidationError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(LocationValidationError::Latitude { value: lat });
    }
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(LocationValidationError::Longitude { value: lon });
    }
    Ok(())
}

/// The location chosen by the latest successful geocode.
///
/// ## Invariants
/// - `lat ∈ [-90, 90]`, `lon ∈ [-180, 180]`, both finite.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    name: String,
    lat: f64,
    lon: f64,
}

impl ResolvedLocation {
    /// Build a location after validating the coordinate.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Result<Self, LocationValidationError> {
        validate_coordinate(lat, lon)?;
        Ok(Self {
            name: name.into(),
            lat,
            lon,
        })
    }

    /// Derive the display name from a geocoder label.
    ///
    /// Uses the first comma-delimited segment of `display_name`, falling back
    /// to the raw query when the label is absent or its first segment is blank.
    pub fn label_from(display_name: Option<&str>, query: &SearchQuery) -> String {
        display_name
            .and_then(|label| label.split(',').next())
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map_or_else(|| query.raw().to_owned(), str::to_owned)
    }

    /// Short display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Latitude in WGS84.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in WGS84.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4}, {:.4})", self.name, self.lat, self.lon)
    }
}

/// Map center and zoom the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    /// `(lat, lon)` of the map center.
    pub center: (f64, f64),
    /// Tile zoom level.
    pub zoom: u8,
}

impl MapViewport {
    /// Viewport that follows a freshly resolved location.
    pub fn following(location: &ResolvedLocation) -> Self {
        Self {
            center: (location.lat(), location.lon()),
            zoom: FOLLOW_UP_ZOOM,
        }
    }
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}
