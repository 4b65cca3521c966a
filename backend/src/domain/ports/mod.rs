//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod directions_source;
mod route_cache;
mod route_calculator;

pub use cache_key::{CACHE_KEY_PRECISION, RouteCacheKey};
#[cfg(test)]
pub use directions_source::MockDirectionsSource;
pub use directions_source::{
    DirectionsSource, FixtureDirectionsSource, PROVIDER_STATUS_OK, RouteError,
};
#[cfg(test)]
pub use route_cache::MockRouteCache;
pub use route_cache::{NoOpRouteCache, RouteCache};
#[cfg(test)]
pub use route_calculator::MockRouteCalculator;
pub use route_calculator::{FixtureRouteCalculator, RouteCalculator};
