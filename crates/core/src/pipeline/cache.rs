//! Series result caching using Moka.
//!
//! Toggling calendar, method, or range in the dashboard recomputes from the same
//! record set; revisiting a combination is served from memory.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use aidflow_shared::config::CacheConfig;

use super::engine::{SeriesEngine, SeriesOutput};
use super::params::SeriesParams;
use crate::error::SeriesResult;
use crate::records::RecordSet;

/// Default cache capacity (number of entries).
const DEFAULT_CACHE_CAPACITY: u64 = 100;

/// Default time-to-live for cache entries (5 minutes).
const DEFAULT_TTL_SECS: u64 = 300;

/// A series result and whether it came from the cache.
#[derive(Debug, Clone)]
pub struct CachedSeries {
    /// The output.
    pub output: Arc<SeriesOutput>,
    /// True when served without recomputation.
    pub cached: bool,
}

/// Cache of series outputs keyed by record and parameter fingerprints.
#[derive(Clone)]
pub struct SeriesCache {
    engine: SeriesEngine,
    cache: Cache<(u64, u64), Arc<SeriesOutput>>,
}

impl SeriesCache {
    /// Creates a cache with default settings: 100 entries max, 5 minute TTL.
    #[must_use]
    pub fn new(engine: SeriesEngine) -> Self {
        Self::with_config(engine, DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECS)
    }

    /// Creates a cache with a custom capacity and time-to-live.
    #[must_use]
    pub fn with_config(engine: SeriesEngine, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { engine, cache }
    }

    /// Creates a cache from configuration.
    #[must_use]
    pub fn from_config(engine: SeriesEngine, config: &CacheConfig) -> Self {
        Self::with_config(engine, config.max_capacity, config.ttl_secs)
    }

    /// Engine used on a miss.
    #[must_use]
    pub const fn engine(&self) -> &SeriesEngine {
        &self.engine
    }

    /// Runs the pipeline, returning a cached output when one exists.
    ///
    /// Failed runs are not cached.
    ///
    /// # Errors
    ///
    /// Same as [`SeriesEngine::run`].
    pub fn run_cached(
        &self,
        records: &RecordSet,
        params: &SeriesParams,
    ) -> SeriesResult<CachedSeries> {
        let key = Self::key(records, params);

        if let Some(output) = self.cache.get(&key) {
            tracing::debug!(params = key.1, "Series served from cache");
            return Ok(CachedSeries {
                output,
                cached: true,
            });
        }

        let output = Arc::new(self.engine.run(records, params)?);
        self.cache.insert(key, Arc::clone(&output));

        Ok(CachedSeries {
            output,
            cached: false,
        })
    }

    /// Invalidates all cached entries, e.g. after the records were refetched.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Invalidates the entry for one record set and parameter combination.
    pub fn invalidate(&self, records: &RecordSet, params: &SeriesParams) {
        self.cache.invalidate(&Self::key(records, params));
    }

    /// Number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs pending maintenance so counts and evictions are up to date.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }

    fn key(records: &RecordSet, params: &SeriesParams) -> (u64, u64) {
        (records.fingerprint(), params.fingerprint())
    }
}

impl Default for SeriesCache {
    fn default() -> Self {
        Self::new(SeriesEngine::default())
    }
}
