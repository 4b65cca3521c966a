//! Geographic value types shared by route queries and route results.
//!
//! Coordinates are WGS84 degrees. A [`GeoPoint`] can only be built through
//! [`GeoPoint::new`], so every instance in the system is finite and inside
//! the latitude and longitude domains.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Valid latitude range in degrees.
pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
/// Valid longitude range in degrees.
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Validation failures raised by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointValidationError {
    /// Latitude was NaN or infinite.
    #[error("latitude must be a finite number")]
    NonFiniteLatitude,
    /// Longitude was NaN or infinite.
    #[error("longitude must be a finite number")]
    NonFiniteLongitude,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Immutable WGS84 coordinate pair.
///
/// Serialises as `{"lat": .., "lng": ..}`, the shape used by both the
/// directions provider and the map client.
///
/// # Examples
/// ```
/// use wayfinder::domain::GeoPoint;
///
/// let point = GeoPoint::new(51.5074, -0.1278).expect("valid point");
/// assert_eq!(point.latitude(), 51.5074);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lng")]
    longitude: f64,
}

impl GeoPoint {
    /// Build a point after checking that both coordinates are finite and in
    /// range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoPointValidationError> {
        if !latitude.is_finite() {
            return Err(GeoPointValidationError::NonFiniteLatitude);
        }
        if !longitude.is_finite() {
            return Err(GeoPointValidationError::NonFiniteLongitude);
        }
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(GeoPointValidationError::LatitudeOutOfRange(latitude));
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(GeoPointValidationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Deserialize)]
struct GeoPointDto {
    lat: f64,
    lng: f64,
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let GeoPointDto { lat, lng } = GeoPointDto::deserialize(deserializer)?;
        Self::new(lat, lng).map_err(serde::de::Error::custom)
    }
}

/// Travel mode requested from the directions provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// On foot.
    #[default]
    Walking,
    /// By bicycle.
    Bicycling,
}

impl TravelMode {
    /// Map the client's `bikeMode` flag onto a travel mode.
    pub fn from_bike_mode(bike_mode: bool) -> Self {
        if bike_mode {
            Self::Bicycling
        } else {
            Self::Walking
        }
    }

    /// Wire value understood by the directions provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Bicycling => "bicycling",
        }
    }

    /// Whether this mode corresponds to the client's bike toggle.
    pub fn is_bicycling(self) -> bool {
        matches!(self, Self::Bicycling)
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request for directions between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteQuery {
    /// Start of the route.
    pub origin: GeoPoint,
    /// End of the route.
    pub destination: GeoPoint,
    /// Requested travel mode.
    pub mode: TravelMode,
}

impl RouteQuery {
    /// Bundle two validated points and a mode.
    pub fn new(origin: GeoPoint, destination: GeoPoint, mode: TravelMode) -> Self {
        Self {
            origin,
            destination,
            mode,
        }
    }
}
