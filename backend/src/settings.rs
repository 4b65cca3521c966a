//! Service configuration loaded via OrthoConfig.
//!
//! Values layer from defaults, configuration files, `WAYFINDER_*`
//! environment variables, and command-line flags. Every field is optional at
//! load time; the accessors apply defaults and validate so startup fails with
//! one descriptive [`SettingsError`].

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::cache::{
    DEFAULT_ROUTE_CACHE_CAPACITY, DEFAULT_ROUTE_CACHE_TTL, RouteCacheConfig,
};
use crate::outbound::directions::{DEFAULT_DIRECTIONS_TIMEOUT, DEFAULT_DIRECTIONS_UNITS};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DIRECTIONS_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/directions/json";
const SUPPORTED_UNITS: [&str; 2] = ["imperial", "metric"];

/// Configuration failures detected at startup.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("WAYFINDER_DIRECTIONS_API_KEY must be set to a non-empty value")]
    MissingApiKey,
    #[error("bind address {value:?} is invalid: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("directions endpoint {value:?} is invalid: {source}")]
    InvalidEndpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("directions timeout must be at least one second")]
    ZeroTimeout,
    #[error("directions units {value:?} must be one of imperial, metric")]
    UnsupportedUnits { value: String },
}

/// Runtime settings for the route service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WAYFINDER")]
pub struct Settings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Credential sent to the directions provider.
    pub directions_api_key: Option<String>,
    /// Directions provider endpoint.
    pub directions_endpoint: Option<String>,
    /// Per-request provider timeout in seconds.
    pub directions_timeout_secs: Option<u64>,
    /// Unit system for provider-formatted distances.
    pub directions_units: Option<String>,
    /// Route cache freshness window in seconds.
    pub route_cache_ttl_secs: Option<u64>,
    /// Maximum number of cached routes.
    pub route_cache_capacity: Option<usize>,
}

impl Settings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// The provider API key; required.
    pub fn directions_api_key(&self) -> Result<&str, SettingsError> {
        self.directions_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(SettingsError::MissingApiKey)
    }

    pub fn directions_endpoint(&self) -> Result<Url, SettingsError> {
        let value = self
            .directions_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_DIRECTIONS_ENDPOINT);
        Url::parse(value).map_err(|source| SettingsError::InvalidEndpoint {
            value: value.to_owned(),
            source,
        })
    }

    pub fn directions_timeout(&self) -> Result<Duration, SettingsError> {
        match self.directions_timeout_secs {
            None => Ok(DEFAULT_DIRECTIONS_TIMEOUT),
            Some(0) => Err(SettingsError::ZeroTimeout),
            Some(seconds) => Ok(Duration::from_secs(seconds)),
        }
    }

    pub fn directions_units(&self) -> Result<&str, SettingsError> {
        let value = self
            .directions_units
            .as_deref()
            .unwrap_or(DEFAULT_DIRECTIONS_UNITS);
        if SUPPORTED_UNITS.contains(&value) {
            Ok(value)
        } else {
            Err(SettingsError::UnsupportedUnits {
                value: value.to_owned(),
            })
        }
    }

    pub fn route_cache_config(&self) -> RouteCacheConfig {
        RouteCacheConfig {
            ttl: self
                .route_cache_ttl_secs
                .map_or(DEFAULT_ROUTE_CACHE_TTL, Duration::from_secs),
            capacity: self
                .route_cache_capacity
                .unwrap_or(DEFAULT_ROUTE_CACHE_CAPACITY),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Defaults, environment overrides, and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "WAYFINDER_BIND_ADDR",
        "WAYFINDER_DIRECTIONS_API_KEY",
        "WAYFINDER_DIRECTIONS_ENDPOINT",
        "WAYFINDER_DIRECTIONS_TIMEOUT_SECS",
        "WAYFINDER_DIRECTIONS_UNITS",
        "WAYFINDER_ROUTE_CACHE_TTL_SECS",
        "WAYFINDER_ROUTE_CACHE_CAPACITY",
    ];

    fn unset() -> Settings {
        Settings {
            bind_addr: None,
            directions_api_key: None,
            directions_endpoint: None,
            directions_timeout_secs: None,
            directions_units: None,
            route_cache_ttl_secs: None,
            route_cache_capacity: None,
        }
    }

    fn load_from_empty_args() -> Settings {
        Settings::load_from_iter([OsString::from("wayfinder")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(
            settings.directions_endpoint().expect("default endpoint").as_str(),
            DEFAULT_DIRECTIONS_ENDPOINT
        );
        assert_eq!(
            settings.directions_timeout().expect("default timeout"),
            Duration::from_secs(10)
        );
        assert_eq!(settings.directions_units().expect("default units"), "imperial");
        assert_eq!(settings.route_cache_config(), RouteCacheConfig::default());
        assert!(matches!(
            settings.directions_api_key(),
            Err(SettingsError::MissingApiKey)
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let values = [
            "127.0.0.1:9090",
            "secret-key",
            "http://localhost:4010/directions/json",
            "3",
            "metric",
            "60",
            "10",
        ];
        let _guard = lock_env(
            VARS.into_iter()
                .zip(values)
                .map(|(name, value)| (name, Some(value.to_owned()))),
        );

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal address")
        );
        assert_eq!(settings.directions_api_key().expect("api key"), "secret-key");
        assert_eq!(
            settings.directions_endpoint().expect("endpoint").as_str(),
            "http://localhost:4010/directions/json"
        );
        assert_eq!(
            settings.directions_timeout().expect("timeout"),
            Duration::from_secs(3)
        );
        assert_eq!(settings.directions_units().expect("units"), "metric");
        assert_eq!(
            settings.route_cache_config(),
            RouteCacheConfig {
                ttl: Duration::from_secs(60),
                capacity: 10,
            }
        );
    }

    #[rstest]
    fn blank_api_key_is_missing() {
        let settings = Settings {
            directions_api_key: Some("  ".into()),
            ..unset()
        };
        assert!(matches!(
            settings.directions_api_key(),
            Err(SettingsError::MissingApiKey)
        ));
    }

    #[rstest]
    fn rejects_invalid_values() {
        let settings = Settings {
            bind_addr: Some("not-an-address".into()),
            directions_endpoint: Some("::".into()),
            directions_timeout_secs: Some(0),
            directions_units: Some("furlongs".into()),
            ..unset()
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidBindAddr { .. })
        ));
        assert!(matches!(
            settings.directions_endpoint(),
            Err(SettingsError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            settings.directions_timeout(),
            Err(SettingsError::ZeroTimeout)
        ));
        assert!(matches!(
            settings.directions_units(),
            Err(SettingsError::UnsupportedUnits { .. })
        ));
    }
}
