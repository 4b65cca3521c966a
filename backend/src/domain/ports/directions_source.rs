//! Driven port for fetching directions from an external provider.
//!
//! The domain owns the query shape, the normalised result, and the error
//! taxonomy so the planner stays independent of any particular provider.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::polyline::PolylineError;
use crate::domain::{RouteQuery, RouteResult, RouteStep};

define_port_error! {
    /// Failures surfaced while validating, fetching, or decoding a route.
    pub enum RouteError {
        /// Caller supplied absent, non-numeric, or out-of-range coordinates.
        InvalidCoordinates { message: String } =>
            "invalid coordinates: {message}",
        /// Provider found no route between the points (`ZERO_RESULTS`).
        NoRouteFound =>
            "no route found between these locations",
        /// Provider could not geocode a point (`NOT_FOUND`).
        LocationNotFound =>
            "one or more locations could not be found",
        /// Provider rejected the request shape (`INVALID_REQUEST`).
        InvalidRequest =>
            "directions provider rejected the request as invalid",
        /// Provider quota is exhausted (`OVER_QUERY_LIMIT`).
        QuotaExceeded =>
            "directions provider quota exceeded; try again later",
        /// Provider refused the credentials (`REQUEST_DENIED`).
        RequestDenied =>
            "directions provider denied the request; check the API key",
        /// Provider reported an internal failure (`UNKNOWN_ERROR`).
        ProviderServerError =>
            "directions provider server error; try again",
        /// Provider returned a status outside the known set.
        UnexpectedProviderStatus { status: String } =>
            "directions provider returned unexpected status {status}",
        /// The request exceeded its timeout.
        NetworkTimeout { message: String } =>
            "directions request timed out: {message}",
        /// The provider could not be reached.
        NetworkUnreachable { message: String } =>
            "cannot reach directions provider: {message}",
        /// The provider answered `OK` without usable route data, or with a
        /// body that could not be decoded.
        MalformedProviderResponse { message: String } =>
            "malformed directions response: {message}",
        /// An encoded path could not be decoded.
        MalformedPolyline { message: String } =>
            "malformed polyline: {message}",
    }
}

/// Provider status value for a successful answer.
pub const PROVIDER_STATUS_OK: &str = "OK";

// Marks an `UnexpectedProviderStatus` derived from the HTTP status line
// because the provider sent no status of its own.
const HTTP_STATUS_PREFIX: &str = "HTTP ";

impl RouteError {
    /// Map a non-`OK` provider status onto the local taxonomy.
    ///
    /// # Examples
    /// ```
    /// use wayfinder::domain::ports::RouteError;
    ///
    /// assert_eq!(RouteError::from_provider_status("ZERO_RESULTS"), RouteError::NoRouteFound);
    /// assert_eq!(
    ///     RouteError::from_provider_status("MAX_WAYPOINTS_EXCEEDED"),
    ///     RouteError::unexpected_provider_status("MAX_WAYPOINTS_EXCEEDED"),
    /// );
    /// ```
    pub fn from_provider_status(status: &str) -> Self {
        match status {
            "ZERO_RESULTS" => Self::NoRouteFound,
            "NOT_FOUND" => Self::LocationNotFound,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "OVER_QUERY_LIMIT" => Self::QuotaExceeded,
            "REQUEST_DENIED" => Self::RequestDenied,
            "UNKNOWN_ERROR" => Self::ProviderServerError,
            other => Self::unexpected_provider_status(other),
        }
    }

    /// Unexpected non-success HTTP status with no provider envelope.
    ///
    /// # Examples
    /// ```
    /// use wayfinder::domain::ports::RouteError;
    ///
    /// let error = RouteError::unexpected_http_status(404);
    /// assert_eq!(error.to_string(), "directions provider returned unexpected status HTTP 404");
    /// assert_eq!(error.provider_status(), None);
    /// ```
    pub fn unexpected_http_status(code: u16) -> Self {
        Self::unexpected_provider_status(format!("{HTTP_STATUS_PREFIX}{code}"))
    }

    /// Raw provider status behind this error, when it came from one.
    pub fn provider_status(&self) -> Option<&str> {
        match self {
            Self::NoRouteFound => Some("ZERO_RESULTS"),
            Self::LocationNotFound => Some("NOT_FOUND"),
            Self::InvalidRequest => Some("INVALID_REQUEST"),
            Self::QuotaExceeded => Some("OVER_QUERY_LIMIT"),
            Self::RequestDenied => Some("REQUEST_DENIED"),
            Self::ProviderServerError => Some("UNKNOWN_ERROR"),
            Self::UnexpectedProviderStatus { status } if !status.starts_with(HTTP_STATUS_PREFIX) => {
                Some(status.as_str())
            }
            _ => None,
        }
    }

    /// Whether a later retry by the caller may succeed.
    ///
    /// Nothing in this crate retries automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::QuotaExceeded
                | Self::RequestDenied
                | Self::ProviderServerError
                | Self::UnexpectedProviderStatus { .. }
                | Self::NetworkTimeout { .. }
                | Self::NetworkUnreachable { .. }
        )
    }
}

impl From<PolylineError> for RouteError {
    fn from(error: PolylineError) -> Self {
        Self::malformed_polyline(error.to_string())
    }
}

/// Port for fetching one route from a directions provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectionsSource: Send + Sync {
    /// Fetch and normalise the first proposed route for `query`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use wayfinder::domain::ports::{DirectionsSource, FixtureDirectionsSource};
    ///
    /// let source = FixtureDirectionsSource;
    /// let route = source.fetch_directions(&query).await?;
    /// assert_eq!(route.mode, query.mode);
    /// # Ok::<(), wayfinder::domain::ports::RouteError>(())
    /// ```
    async fn fetch_directions(&self, query: &RouteQuery) -> Result<RouteResult, RouteError>;
}

/// Fixture implementation returning a straight single-step route.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureDirectionsSource;

#[async_trait]
impl DirectionsSource for FixtureDirectionsSource {
    async fn fetch_directions(&self, query: &RouteQuery) -> Result<RouteResult, RouteError> {
        Ok(fixture_route(query))
    }
}

fn fixture_route(query: &RouteQuery) -> RouteResult {
    let path = crate::domain::polyline::encode(&[query.origin, query.destination]);
    RouteResult {
        distance_meters: 0,
        duration_seconds: 0,
        distance_text: "0 ft".to_owned(),
        duration_text: "1 min".to_owned(),
        steps: vec![RouteStep {
            instruction: format!("Head towards {}", query.destination),
            distance_text: "0 ft".to_owned(),
            duration_text: "1 min".to_owned(),
            start_location: query.origin,
            end_location: query.destination,
        }],
        encoded_path: path,
        mode: query.mode,
        start_address: query.origin.to_string(),
        end_address: query.destination.to_string(),
        bounds: None,
    }
}
