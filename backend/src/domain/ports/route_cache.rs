//! Port interface for caching normalised route results.
//!
//! The cache is a latency and quota optimisation only. Adapters may drop
//! entries at any time; callers treat every miss as "ask the provider".
use std::sync::Arc;

use crate::domain::{RouteQuery, RouteResult};

/// Synchronous cache of route results keyed by [`super::RouteCacheKey`].
///
/// Implementations must tolerate concurrent `get` and `put` calls from many
/// request tasks and must never suspend.
#[cfg_attr(test, mockall::automock)]
pub trait RouteCache: Send + Sync {
    /// Return the cached result for `query` if a fresh entry exists.
    fn get(&self, query: &RouteQuery) -> Option<Arc<RouteResult>>;

    /// Store `result` for `query`, evicting older entries when full.
    fn put(&self, query: &RouteQuery, result: Arc<RouteResult>);

    /// Drop every entry.
    fn clear(&self);

    /// Number of stored entries, including expired ones not yet replaced.
    fn len(&self) -> usize;

    /// Whether the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRouteCache;

impl RouteCache for NoOpRouteCache {
    fn get(&self, _query: &RouteQuery) -> Option<Arc<RouteResult>> {
        None
    }

    fn put(&self, _query: &RouteQuery, _result: Arc<RouteResult>) {}

    fn clear(&self) {}

    fn len(&self) -> usize {
        0
    }
}
