//! Route calculation service.
//!
//! Orchestrates validation, cache lookup, and the directions provider:
//! `validate -> cache.get -> (miss) source.fetch -> cache.put -> return`.
//! Failures are surfaced immediately; the planner never retries and does
//! not coalesce concurrent misses for the same key.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::ports::{DirectionsSource, RouteCache, RouteCacheKey, RouteCalculator, RouteError};
use super::{RouteQuery, RouteRequestInput, RouteResult};

/// Domain service implementing [`RouteCalculator`].
#[derive(Clone)]
pub struct RoutePlanner {
    source: Arc<dyn DirectionsSource>,
    cache: Arc<dyn RouteCache>,
}

impl RoutePlanner {
    /// Build a planner over an injected provider and cache.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use wayfinder::domain::RoutePlanner;
    /// use wayfinder::domain::ports::{FixtureDirectionsSource, NoOpRouteCache};
    ///
    /// let planner = RoutePlanner::new(Arc::new(FixtureDirectionsSource), Arc::new(NoOpRouteCache));
    /// # let _ = planner;
    /// ```
    pub fn new(source: Arc<dyn DirectionsSource>, cache: Arc<dyn RouteCache>) -> Self {
        Self { source, cache }
    }

    /// Calculate a route for an already validated query.
    pub async fn calculate_query(&self, query: &RouteQuery) -> Result<Arc<RouteResult>, RouteError> {
        let key = RouteCacheKey::for_query(query);
        info!(
            origin = %query.origin,
            destination = %query.destination,
            mode = %query.mode,
            cache_key = %key,
            "route requested"
        );
        if let Some(cached) = self.cache.get(query) {
            return Ok(cached);
        }

        debug!(cache_key = %key, "cache miss; calling directions provider");
        let route = match self.source.fetch_directions(query).await {
            Ok(route) => Arc::new(route),
            Err(error) => {
                warn!(
                    error = %error,
                    kind = error.kind(),
                    provider_status = error.provider_status(),
                    cache_key = %key,
                    "route calculation failed"
                );
                return Err(error);
            }
        };

        self.cache.put(query, Arc::clone(&route));
        info!(
            distance = %route.distance_text,
            duration = %route.duration_text,
            steps = route.steps.len(),
            cache_key = %key,
            "route calculated"
        );
        Ok(route)
    }
}

#[async_trait]
impl RouteCalculator for RoutePlanner {
    async fn calculate(&self, input: RouteRequestInput) -> Result<Arc<RouteResult>, RouteError> {
        let query = input.validate().inspect_err(|error| {
            debug!(error = %error, "rejected route request");
        })?;
        self.calculate_query(&query).await
    }

    fn clear_cache(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    //! Orchestration coverage using mocked ports and the in-memory cache.
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use mockable::Clock;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{MockDirectionsSource, MockRouteCache, NoOpRouteCache};
    use crate::domain::{GeoPoint, TravelMode};
    use crate::outbound::cache::{InMemoryRouteCache, RouteCacheConfig};
    use crate::test_support::{CapturedLogs, MutableClock, sample_route};

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock::new(start))
    }

    fn planner_with(source: impl DirectionsSource + 'static, clock: Arc<MutableClock>) -> RoutePlanner {
        let clock: Arc<dyn Clock> = clock;
        let cache = InMemoryRouteCache::new(clock, RouteCacheConfig::default());
        RoutePlanner::new(Arc::new(source), Arc::new(cache))
    }

    fn input() -> RouteRequestInput {
        RouteRequestInput::from_coordinates(34.0689, -118.4452, 34.0700, -118.4440, false)
    }

    /// Source that counts calls and answers with a route for the query mode.
    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DirectionsSource for CountingSource {
        async fn fetch_directions(&self, query: &RouteQuery) -> Result<RouteResult, RouteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(sample_route(query))
        }
    }

    #[rstest]
    #[tokio::test]
    async fn out_of_range_origin_fails_without_network_call() {
        let mut source = MockDirectionsSource::new();
        source.expect_fetch_directions().times(0);
        let mut cache = MockRouteCache::new();
        cache.expect_get().times(0);
        cache.expect_put().times(0);
        let planner = RoutePlanner::new(Arc::new(source), Arc::new(cache));

        let mut request = input();
        request.origin_lat = Some("91".to_owned());
        let error = planner.calculate(request).await.expect_err("latitude 91 rejected");
        assert!(matches!(error, RouteError::InvalidCoordinates { .. }), "{error:?}");
    }

    #[rstest]
    #[tokio::test]
    async fn second_request_is_served_from_cache(clock: Arc<MutableClock>) {
        let source = Arc::new(CountingSource::default());
        let cache = Arc::new(InMemoryRouteCache::new(clock, RouteCacheConfig::default()));
        let planner = RoutePlanner::new(source.clone(), cache.clone());

        let first = planner.calculate(input()).await.expect("first fetch");
        let second = planner.calculate(input()).await.expect("cached fetch");

        assert!(Arc::ptr_eq(&first, &second), "cache returns the stored route");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn every_request_is_logged_and_hits_once(clock: Arc<MutableClock>) {
        let logs = CapturedLogs::default();
        let _guard = logs.install();
        let planner = planner_with(CountingSource::default(), clock);

        planner.calculate(input()).await.expect("first fetch");
        planner.calculate(input()).await.expect("cached fetch");

        assert_eq!(logs.count("route requested"), 2, "{}", logs.contents());
        assert_eq!(logs.count("cache miss"), 1, "{}", logs.contents());
        assert_eq!(logs.count("route cache hit"), 1, "{}", logs.contents());
    }

    #[rstest]
    #[tokio::test]
    async fn expired_entry_triggers_a_new_fetch(clock: Arc<MutableClock>) {
        let source = Arc::new(CountingSource::default());
        let cache = Arc::new(InMemoryRouteCache::new(clock.clone(), RouteCacheConfig::default()));
        let planner = RoutePlanner::new(source.clone(), cache);

        planner.calculate(input()).await.expect("first fetch");
        clock.advance(Duration::from_secs(300));
        planner.calculate(input()).await.expect("refetch after expiry");

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn provider_errors_propagate_and_are_not_cached(clock: Arc<MutableClock>) {
        let mut source = MockDirectionsSource::new();
        source
            .expect_fetch_directions()
            .times(2)
            .returning(|_| Err(RouteError::no_route_found()));
        let planner = planner_with(source, clock);

        for _ in 0..2 {
            let error = planner.calculate(input()).await.expect_err("no route");
            assert_eq!(error, RouteError::NoRouteFound);
        }
    }

    #[rstest]
    #[tokio::test]
    async fn travel_mode_is_part_of_the_cache_identity(clock: Arc<MutableClock>) {
        let source = Arc::new(CountingSource::default());
        let cache = Arc::new(InMemoryRouteCache::new(clock, RouteCacheConfig::default()));
        let planner = RoutePlanner::new(source.clone(), cache);

        let walk = planner.calculate(input()).await.expect("walking");
        let mut bike_input = input();
        bike_input.bike_mode = true;
        let bike = planner.calculate(bike_input).await.expect("cycling");

        assert_eq!(walk.mode, TravelMode::Walking);
        assert_eq!(bike.mode, TravelMode::Bicycling);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn clear_cache_forces_refetch(clock: Arc<MutableClock>) {
        let source = Arc::new(CountingSource::default());
        let cache = Arc::new(InMemoryRouteCache::new(clock, RouteCacheConfig::default()));
        let planner = RoutePlanner::new(source.clone(), cache.clone());

        planner.calculate(input()).await.expect("first fetch");
        planner.clear_cache();
        assert!(cache.is_empty());
        planner.calculate(input()).await.expect("refetch");

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_requests_for_distinct_keys_do_not_interfere(clock: Arc<MutableClock>) {
        let source = Arc::new(CountingSource::default());
        let cache = Arc::new(InMemoryRouteCache::new(clock, RouteCacheConfig::default()));
        let planner = Arc::new(RoutePlanner::new(source.clone(), cache.clone()));

        let queries: Vec<RouteQuery> = (0..32)
            .map(|i| {
                let offset = f64::from(i) * 0.001;
                RouteQuery::new(
                    GeoPoint::new(34.0 + offset, -118.0).expect("origin"),
                    GeoPoint::new(34.5, -118.5 + offset).expect("destination"),
                    TravelMode::from_bike_mode(i % 2 == 0),
                )
            })
            .collect();

        let handles = queries.iter().copied().map(|query| {
            let planner = Arc::clone(&planner);
            tokio::spawn(async move { (query, planner.calculate_query(&query).await) })
        });
        let outcomes = futures::future::join_all(handles).await;

        for outcome in outcomes {
            let (query, result) = outcome.expect("task completes");
            let route = result.expect("route calculated");
            assert_eq!(route.start_address, query.origin.to_string());
            assert_eq!(route.end_address, query.destination.to_string());
            assert_eq!(route.mode, query.mode);
            let cached = cache.get(&query).expect("entry cached");
            assert!(Arc::ptr_eq(&cached, &route), "entry belongs to its own key");
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), queries.len());
        assert_eq!(cache.len(), queries.len());
    }

    #[rstest]
    #[tokio::test]
    async fn works_without_a_cache() {
        let source = Arc::new(CountingSource::default());
        let planner = RoutePlanner::new(source.clone(), Arc::new(NoOpRouteCache));

        planner.calculate(input()).await.expect("first fetch");
        planner.calculate(input()).await.expect("second fetch");

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
