//! Domain cache key type shared by route cache adapters.
//!
//! Keys are derived from a [`RouteQuery`] by rounding every coordinate to
//! four decimal places (roughly 11 metres). Queries that land in the same
//! rounding cell with the same travel mode share a key, so nearby requests
//! reuse one cached route.
use crate::domain::{GeoPoint, RouteQuery};

/// Decimal places kept when fingerprinting coordinates.
pub const CACHE_KEY_PRECISION: u32 = 4;

const CACHE_KEY_SCALE: f64 = 10_000.0;

/// Cache key used to store and retrieve normalised route results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteCacheKey(String);

impl RouteCacheKey {
    /// Fingerprint a query as `olat,olng-dlat,dlng-mode`.
    ///
    /// # Examples
    /// ```
    /// use wayfinder::domain::ports::RouteCacheKey;
    /// use wayfinder::domain::{GeoPoint, RouteQuery, TravelMode};
    ///
    /// let query = RouteQuery::new(
    ///     GeoPoint::new(40.712_84, -74.006_04).expect("origin"),
    ///     GeoPoint::new(40.7306, -73.9866).expect("destination"),
    ///     TravelMode::Walking,
    /// );
    /// let key = RouteCacheKey::for_query(&query);
    /// assert_eq!(key.as_str(), "40.7128,-74.0060-40.7306,-73.9866-walking");
    /// ```
    pub fn for_query(query: &RouteQuery) -> Self {
        Self(format!(
            "{}-{}-{}",
            rounded_pair(query.origin),
            rounded_pair(query.destination),
            query.mode.as_str()
        ))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn rounded_pair(point: GeoPoint) -> String {
    format!(
        "{},{}",
        rounded_coordinate(point.latitude()),
        rounded_coordinate(point.longitude())
    )
}

// Validated coordinates are bounded by 180, so the scaled value always fits
// an i64. Formatting from the integer avoids a "-0.0000" key.
fn rounded_coordinate(value: f64) -> String {
    let scaled = (value * CACHE_KEY_SCALE).round() as i64;
    let sign = if scaled < 0 { "-" } else { "" };
    let magnitude = scaled.unsigned_abs();
    let divisor = 10_u64.pow(CACHE_KEY_PRECISION);
    format!(
        "{sign}{}.{:0width$}",
        magnitude / divisor,
        magnitude % divisor,
        width = CACHE_KEY_PRECISION as usize
    )
}

impl std::fmt::Display for RouteCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RouteCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
