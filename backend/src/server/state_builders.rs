//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use wayfinder::domain::RoutePlanner;
use wayfinder::inbound::http::state::HttpState;
use wayfinder::outbound::cache::InMemoryRouteCache;
use wayfinder::outbound::directions::DirectionsHttpSource;

use super::ServerConfig;

/// Build the route planner from the provider adapter and an in-memory cache.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let directions = &config.directions;
    let source = DirectionsHttpSource::new(
        directions.endpoint.clone(),
        directions.api_key.clone(),
        directions.timeout,
    )
    .map_err(|e| std::io::Error::other(format!("directions client construction failed: {e}")))?
    .with_units(directions.units.clone());
    let cache = InMemoryRouteCache::new(Arc::new(DefaultClock), config.route_cache);
    info!(
        capacity = cache.capacity(),
        ttl_secs = config.route_cache.ttl.as_secs(),
        "route cache configured"
    );
    let planner = RoutePlanner::new(Arc::new(source), Arc::new(cache));
    Ok(web::Data::new(HttpState::new(Arc::new(planner))))
}
