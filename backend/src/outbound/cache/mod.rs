//! In-process route cache with expiry and oldest-first eviction.
//!
//! Entries are keyed by [`RouteCacheKey::for_query`], so queries whose
//! coordinates round to the same four decimals share an entry. An entry is
//! fresh while `now - inserted_at < ttl`. Expired entries are left in place
//! and count towards capacity until they are overwritten or evicted.
//!
//! State sits behind a `std::sync::Mutex`. The lock is never held across an
//! `.await`; every operation is a handful of map and queue updates.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{RouteCache, RouteCacheKey};
use crate::domain::{RouteQuery, RouteResult};

/// Default freshness window for cached routes.
pub const DEFAULT_ROUTE_CACHE_TTL: Duration = Duration::from_secs(300);
/// Default maximum number of cached routes.
pub const DEFAULT_ROUTE_CACHE_CAPACITY: usize = 100;

/// Tuning knobs for [`InMemoryRouteCache`].
///
/// A capacity of zero disables caching: every insert is evicted at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteCacheConfig {
    pub ttl: Duration,
    pub capacity: usize,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_ROUTE_CACHE_TTL,
            capacity: DEFAULT_ROUTE_CACHE_CAPACITY,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    result: Arc<RouteResult>,
    inserted_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<RouteCacheKey, CacheEntry>,
    // Oldest insertion at the front. Holds exactly the keys of `entries`.
    order: VecDeque<RouteCacheKey>,
}

impl CacheState {
    fn touch(&mut self, key: &RouteCacheKey) {
        if let Some(position) = self.order.iter().position(|existing| existing == key) {
            self.order.remove(position);
        }
        self.order.push_back(key.clone());
    }

    fn evict_oldest(&mut self) -> Option<RouteCacheKey> {
        let oldest = self.order.pop_front()?;
        self.entries.remove(&oldest);
        Some(oldest)
    }
}

/// Bounded in-memory [`RouteCache`] driven by an injected clock.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use wayfinder::domain::ports::RouteCache;
/// use wayfinder::outbound::cache::{InMemoryRouteCache, RouteCacheConfig};
///
/// let cache = InMemoryRouteCache::new(Arc::new(DefaultClock), RouteCacheConfig::default());
/// assert!(cache.is_empty());
/// ```
pub struct InMemoryRouteCache {
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    capacity: usize,
    state: Mutex<CacheState>,
}

impl InMemoryRouteCache {
    pub fn new(clock: Arc<dyn Clock>, config: RouteCacheConfig) -> Self {
        let ttl = TimeDelta::from_std(config.ttl).unwrap_or(TimeDelta::MAX);
        Self {
            clock,
            ttl,
            capacity: config.capacity,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // Each mutation leaves the map and queue consistent, so a panic in
        // another holder cannot corrupt them.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.inserted_at) < self.ttl
    }
}

impl RouteCache for InMemoryRouteCache {
    fn get(&self, query: &RouteQuery) -> Option<Arc<RouteResult>> {
        let key = RouteCacheKey::for_query(query);
        let now = self.clock.utc();
        let state = self.lock();
        let entry = state.entries.get(&key)?;
        if !self.is_fresh(entry, now) {
            debug!(cache_key = %key, inserted_at = %entry.inserted_at, "cached route expired");
            return None;
        }
        debug!(cache_key = %key, "route cache hit");
        Some(Arc::clone(&entry.result))
    }

    fn put(&self, query: &RouteQuery, result: Arc<RouteResult>) {
        let key = RouteCacheKey::for_query(query);
        let inserted_at = self.clock.utc();
        let mut state = self.lock();
        state.touch(&key);
        state.entries.insert(key, CacheEntry { result, inserted_at });
        while state.entries.len() > self.capacity {
            match state.evict_oldest() {
                Some(evicted) => debug!(cache_key = %evicted, "evicted oldest cached route"),
                None => break,
            }
        }
    }

    fn clear(&self) {
        let mut state = self.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        state.order.clear();
        info!(dropped, "route cache cleared");
    }

    fn len(&self) -> usize {
        self.lock().entries.len()
    }
}
