//! Driving port used by inbound adapters to calculate routes.

use std::sync::Arc;

use async_trait::async_trait;

use super::{DirectionsSource, FixtureDirectionsSource, RouteError};
use crate::domain::{RouteRequestInput, RouteResult};

/// Use-case boundary for route calculation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RouteCalculator: Send + Sync {
    /// Validate raw input and return a (possibly cached) route.
    async fn calculate(&self, input: RouteRequestInput) -> Result<Arc<RouteResult>, RouteError>;

    /// Drop every cached route.
    fn clear_cache(&self);
}

/// Fixture calculator backed by [`FixtureDirectionsSource`] with no caching.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRouteCalculator;

#[async_trait]
impl RouteCalculator for FixtureRouteCalculator {
    async fn calculate(&self, input: RouteRequestInput) -> Result<Arc<RouteResult>, RouteError> {
        let query = input.validate()?;
        FixtureDirectionsSource
            .fetch_directions(&query)
            .await
            .map(Arc::new)
    }

    fn clear_cache(&self) {}
}
