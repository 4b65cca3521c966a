//! Reqwest-backed directions source adapter.
//!
//! This adapter owns transport details only: query parameters, the request
//! timeout, provider status mapping, and JSON decoding into a domain
//! [`RouteResult`]. It neither caches nor retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use super::dto::DirectionsResponseDto;
use crate::domain::ports::{DirectionsSource, PROVIDER_STATUS_OK, RouteError};
use crate::domain::{GeoPoint, RouteQuery, RouteResult};

/// Default request timeout for provider calls.
pub const DEFAULT_DIRECTIONS_TIMEOUT: Duration = Duration::from_secs(10);
/// Default unit system for provider-formatted distances.
pub const DEFAULT_DIRECTIONS_UNITS: &str = "imperial";

/// Directions source performing HTTP GET requests against one endpoint.
pub struct DirectionsHttpSource {
    client: Client,
    endpoint: Url,
    api_key: String,
    units: String,
}

impl DirectionsHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let source = DirectionsHttpSource::new(endpoint, api_key, Duration::from_secs(10))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            units: DEFAULT_DIRECTIONS_UNITS.to_owned(),
        })
    }

    /// Override the unit system (`imperial` or `metric`).
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    fn query_params(&self, query: &RouteQuery) -> [(&'static str, String); 6] {
        [
            ("origin", format_point(query.origin)),
            ("destination", format_point(query.destination)),
            ("mode", query.mode.as_str().to_owned()),
            ("units", self.units.clone()),
            ("alternatives", "false".to_owned()),
            ("key", self.api_key.clone()),
        ]
    }
}

#[async_trait]
impl DirectionsSource for DirectionsHttpSource {
    async fn fetch_directions(&self, query: &RouteQuery) -> Result<RouteResult, RouteError> {
        debug!(
            endpoint = %self.endpoint,
            mode = %query.mode,
            "calling directions provider"
        );
        let response = self
            .client
            .get(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&self.query_params(query))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        let envelope = parse_envelope(body.as_ref())?;
        check_provider_status(&envelope)?;
        envelope.into_route_result(query)
    }
}

fn format_point(point: GeoPoint) -> String {
    format!("{},{}", point.latitude(), point.longitude())
}

fn parse_envelope(body: &[u8]) -> Result<DirectionsResponseDto, RouteError> {
    serde_json::from_slice(body).map_err(|error| {
        RouteError::malformed_provider_response(format!("invalid directions JSON payload: {error}"))
    })
}

fn check_provider_status(envelope: &DirectionsResponseDto) -> Result<(), RouteError> {
    match envelope.status.as_deref() {
        Some(PROVIDER_STATUS_OK) => Ok(()),
        Some(status) => {
            if let Some(message) = envelope.error_message.as_deref() {
                warn!(
                    provider_status = status,
                    provider_message = message,
                    "directions provider refused request"
                );
            }
            Err(RouteError::from_provider_status(status))
        }
        None => Err(RouteError::malformed_provider_response(
            "response is missing status",
        )),
    }
}

fn map_transport_error(error: reqwest::Error) -> RouteError {
    // The request URL carries the API key.
    let error = error.without_url();
    if error.is_timeout() {
        RouteError::network_timeout(error.to_string())
    } else {
        RouteError::network_unreachable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RouteError {
    let provider_status = serde_json::from_slice::<DirectionsResponseDto>(body)
        .ok()
        .and_then(|envelope| envelope.status)
        .filter(|value| value.as_str() != PROVIDER_STATUS_OK);
    if let Some(provider_status) = provider_status {
        return RouteError::from_provider_status(&provider_status);
    }

    debug!(
        http_status = status.as_u16(),
        body = %body_preview(body),
        "directions provider returned an error status"
    );
    match status {
        StatusCode::TOO_MANY_REQUESTS => RouteError::quota_exceeded(),
        StatusCode::FORBIDDEN => RouteError::request_denied(),
        _ if status.is_server_error() => RouteError::provider_server_error(),
        _ => RouteError::unexpected_http_status(status.as_u16()),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
