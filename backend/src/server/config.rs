//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;
use wayfinder::outbound::cache::RouteCacheConfig;
use wayfinder::settings::{Settings, SettingsError};

/// Connection details for the directions provider.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub(crate) endpoint: Url,
    pub(crate) api_key: String,
    pub(crate) timeout: Duration,
    pub(crate) units: String,
}

/// Validated configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) directions: DirectionsConfig,
    pub(crate) route_cache: RouteCacheConfig,
}

impl ServerConfig {
    /// Resolve defaults and validate every setting the server needs.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] encountered.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            directions: DirectionsConfig {
                endpoint: settings.directions_endpoint()?,
                api_key: settings.directions_api_key()?.to_owned(),
                timeout: settings.directions_timeout()?,
                units: settings.directions_units()?.to_owned(),
            },
            route_cache: settings.route_cache_config(),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
