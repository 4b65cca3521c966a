//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::RouteCalculator;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub route_calculator: Arc<dyn RouteCalculator>,
}

impl HttpState {
    /// Construct state from the route calculation port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use wayfinder::domain::ports::FixtureRouteCalculator;
    /// use wayfinder::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureRouteCalculator));
    /// # let _ = state;
    /// ```
    pub fn new(route_calculator: Arc<dyn RouteCalculator>) -> Self {
        Self { route_calculator }
    }
}
