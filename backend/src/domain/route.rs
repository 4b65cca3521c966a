//! Normalised route results produced by directions sources.

use serde::{Deserialize, Serialize};

use super::polyline::{self, PolylineError};
use super::{GeoPoint, TravelMode};

/// One turn-by-turn instruction in a route leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Plain-text instruction with markup removed.
    pub instruction: String,
    /// Provider-formatted distance, for example `"0.2 mi"`.
    pub distance_text: String,
    /// Provider-formatted duration, for example `"4 mins"`.
    pub duration_text: String,
    /// Where the step begins.
    pub start_location: GeoPoint,
    /// Where the step ends.
    pub end_location: GeoPoint,
}

/// Viewport enclosing the whole route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteBounds {
    /// North-east corner.
    pub northeast: GeoPoint,
    /// South-west corner.
    pub southwest: GeoPoint,
}

/// Normalised result for one route query.
///
/// ## Invariants
/// - Instances are immutable once produced; caches share them behind an
///   `Arc`.
/// - `encoded_path` uses the 5-decimal polyline format understood by
///   [`polyline::decode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Total distance in metres.
    pub distance_meters: u64,
    /// Total duration in seconds.
    pub duration_seconds: u64,
    /// Provider-formatted total distance.
    pub distance_text: String,
    /// Provider-formatted total duration.
    pub duration_text: String,
    /// Ordered turn-by-turn steps.
    pub steps: Vec<RouteStep>,
    /// Encoded overview path.
    pub encoded_path: String,
    /// Travel mode the route was computed for.
    pub mode: TravelMode,
    /// Provider-resolved start address.
    pub start_address: String,
    /// Provider-resolved end address.
    pub end_address: String,
    /// Route viewport, when the provider supplied one.
    pub bounds: Option<RouteBounds>,
}

impl RouteResult {
    /// Decode the overview path into points for rendering.
    ///
    /// # Examples
    /// ```
    /// use wayfinder::domain::{RouteResult, TravelMode};
    ///
    /// let route = RouteResult {
    ///     distance_meters: 0,
    ///     duration_seconds: 0,
    ///     distance_text: String::new(),
    ///     duration_text: String::new(),
    ///     steps: Vec::new(),
    ///     encoded_path: "_p~iF~ps|U".to_owned(),
    ///     mode: TravelMode::Walking,
    ///     start_address: String::new(),
    ///     end_address: String::new(),
    ///     bounds: None,
    /// };
    /// let path = route.decoded_path().expect("valid polyline");
    /// assert_eq!(path.len(), 1);
    /// ```
    pub fn decoded_path(&self) -> Result<Vec<GeoPoint>, PolylineError> {
        polyline::decode(&self.encoded_path)
    }
}
