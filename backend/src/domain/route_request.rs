//! Validation of raw route requests.
//!
//! Inbound adapters hand over coordinates exactly as received (query-string
//! text, possibly missing). Validation runs before any cache lookup or
//! provider call and rejects the request with
//! [`RouteError::InvalidCoordinates`] naming the first offending field.

use super::ports::RouteError;
use super::{GeoPoint, GeoPointValidationError, RouteQuery, TravelMode};

/// Raw, unvalidated route request as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRequestInput {
    /// Origin latitude text.
    pub origin_lat: Option<String>,
    /// Origin longitude text.
    pub origin_lng: Option<String>,
    /// Destination latitude text.
    pub dest_lat: Option<String>,
    /// Destination longitude text.
    pub dest_lng: Option<String>,
    /// Request a cycling route instead of a walking one.
    pub bike_mode: bool,
}

impl RouteRequestInput {
    /// Build input from numeric coordinates.
    ///
    /// # Examples
    /// ```
    /// use wayfinder::domain::RouteRequestInput;
    ///
    /// let query = RouteRequestInput::from_coordinates(34.0689, -118.4452, 34.07, -118.444, true)
    ///     .validate()
    ///     .expect("valid request");
    /// assert!(query.mode.is_bicycling());
    /// ```
    pub fn from_coordinates(
        origin_lat: f64,
        origin_lng: f64,
        dest_lat: f64,
        dest_lng: f64,
        bike_mode: bool,
    ) -> Self {
        Self {
            origin_lat: Some(origin_lat.to_string()),
            origin_lng: Some(origin_lng.to_string()),
            dest_lat: Some(dest_lat.to_string()),
            dest_lng: Some(dest_lng.to_string()),
            bike_mode,
        }
    }

    /// Check every coordinate and produce a [`RouteQuery`].
    pub fn validate(&self) -> Result<RouteQuery, RouteError> {
        let origin = point(
            Field::OriginLat,
            self.origin_lat.as_deref(),
            Field::OriginLng,
            self.origin_lng.as_deref(),
        )?;
        let destination = point(
            Field::DestLat,
            self.dest_lat.as_deref(),
            Field::DestLng,
            self.dest_lng.as_deref(),
        )?;
        Ok(RouteQuery::new(
            origin,
            destination,
            TravelMode::from_bike_mode(self.bike_mode),
        ))
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    OriginLat,
    OriginLng,
    DestLat,
    DestLng,
}

impl Field {
    fn as_str(self) -> &'static str {
        match self {
            Self::OriginLat => "originLat",
            Self::OriginLng => "originLng",
            Self::DestLat => "destLat",
            Self::DestLng => "destLng",
        }
    }
}

fn point(
    lat_field: Field,
    lat: Option<&str>,
    lng_field: Field,
    lng: Option<&str>,
) -> Result<GeoPoint, RouteError> {
    let latitude = number(lat_field, lat)?;
    let longitude = number(lng_field, lng)?;
    GeoPoint::new(latitude, longitude).map_err(|error| {
        let field = match error {
            GeoPointValidationError::NonFiniteLatitude
            | GeoPointValidationError::LatitudeOutOfRange(_) => lat_field,
            GeoPointValidationError::NonFiniteLongitude
            | GeoPointValidationError::LongitudeOutOfRange(_) => lng_field,
        };
        RouteError::invalid_coordinates(format!("{}: {error}", field.as_str()))
    })
}

fn number(field: Field, raw: Option<&str>) -> Result<f64, RouteError> {
    let name = field.as_str();
    let text = raw
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| RouteError::invalid_coordinates(format!("{name} is required")))?;
    text.parse::<f64>()
        .map_err(|_| RouteError::invalid_coordinates(format!("{name} must be a number, got {text:?}")))
}
