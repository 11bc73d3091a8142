//! In-memory query cache.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::query_model::{QueryKey, QueryKind, QueryOptions, QueryState, QueryStatus};
use crate::errors::Result;

struct CacheEntry {
    status: QueryStatus,
    data: Option<Arc<dyn Any + Send + Sync>>,
    error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    /// Bumped by every invalidation; a fetch that started under an older
    /// generation lands as stale.
    generation: u64,
}

impl CacheEntry {
    fn empty() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            updated_at: None,
            generation: 0,
        }
    }

    fn state<T: Clone + 'static>(&self) -> QueryState<T> {
        QueryState {
            status: self.status,
            data: self
                .data
                .as_ref()
                .and_then(|d| d.downcast_ref::<T>())
                .cloned(),
            error: self.error.clone(),
            updated_at: self.updated_at,
        }
    }

    fn holds<T: 'static>(&self) -> bool {
        self.data.as_ref().is_some_and(|d| d.is::<T>())
    }
}

enum FetchPlan<T> {
    Cached(QueryState<T>),
    Fetch { generation: u64 },
}

/// Read-through cache keyed by [`QueryKey`].
///
/// Only two things mutate an entry: a completed fetch storing its result,
/// and [`invalidate`](Self::invalidate). Locks are never held across an
/// `.await`.
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, CacheEntry>>,
}

/// Process-wide handle, built once at startup and shared by services.
pub type SharedQueryCache = Arc<QueryCache>;

impl QueryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn shared() -> SharedQueryCache {
        Arc::new(Self::new())
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads `key`, calling `fetcher` when there is no fresh value.
    ///
    /// Disabled reads return [`QueryState::idle`] without touching the
    /// cache. On success the value is stored and pushed to
    /// `options.on_success` once. On failure the entry keeps its last good
    /// value and reports [`QueryStatus::Error`].
    pub async fn fetch<T, F, Fut>(
        &self,
        key: QueryKey,
        options: QueryOptions<T>,
        fetcher: F,
    ) -> QueryState<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !options.enabled {
            debug!("Query {} is disabled, skipping fetch", key);
            return QueryState::idle();
        }

        let generation = match self.begin_fetch::<T>(&key) {
            FetchPlan::Cached(state) => return state,
            FetchPlan::Fetch { generation } => generation,
        };

        debug!("Fetching query {}", key);
        let result = fetcher().await;

        match result {
            Ok(value) => {
                let state = self.store_success(&key, generation, value);
                if let (Some(listener), Some(value)) = (&options.on_success, &state.data) {
                    listener(value);
                }
                state
            }
            Err(err) => {
                warn!("Query {} failed: {}", key, err);
                self.store_error(&key, err.to_string())
            }
        }
    }

    fn begin_fetch<T: Clone + 'static>(&self, key: &QueryKey) -> FetchPlan<T> {
        let mut entries = self.write();
        let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::empty);
        if entry.status == QueryStatus::Fresh && entry.holds::<T>() {
            return FetchPlan::Cached(entry.state());
        }
        entry.status = QueryStatus::Fetching;
        FetchPlan::Fetch {
            generation: entry.generation,
        }
    }

    fn store_success<T: Clone + Send + Sync + 'static>(
        &self,
        key: &QueryKey,
        generation: u64,
        value: T,
    ) -> QueryState<T> {
        let mut entries = self.write();
        let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::empty);
        entry.status = if entry.generation == generation {
            QueryStatus::Fresh
        } else {
            debug!("Query {} was invalidated while fetching", key);
            QueryStatus::Stale
        };
        entry.error = None;
        entry.updated_at = Some(Utc::now());
        entry.data = Some(Arc::new(value.clone()));

        QueryState {
            status: entry.status,
            data: Some(value),
            error: None,
            updated_at: entry.updated_at,
        }
    }

    fn store_error<T: Clone + 'static>(&self, key: &QueryKey, message: String) -> QueryState<T> {
        let mut entries = self.write();
        let entry = entries.entry(key.clone()).or_insert_with(CacheEntry::empty);
        entry.status = QueryStatus::Error;
        entry.error = Some(message);
        entry.state()
    }

    /// Marks every entry matching `(kind, key)` stale.
    ///
    /// A `None` key invalidates the whole kind. Returns the number of
    /// entries touched.
    pub fn invalidate(&self, kind: QueryKind, key: Option<&str>) -> usize {
        let mut entries = self.write();
        let mut touched = 0;
        for (entry_key, entry) in entries.iter_mut() {
            if !entry_key.matches(kind, key) {
                continue;
            }
            entry.generation += 1;
            if matches!(entry.status, QueryStatus::Fresh | QueryStatus::Error) {
                entry.status = QueryStatus::Stale;
            }
            touched += 1;
        }
        debug!(
            "Invalidated {} {} entries (key: {:?})",
            touched, kind, key
        );
        touched
    }

    /// Current state of `key` without fetching.
    pub fn peek<T: Clone + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        self.read()
            .get(key)
            .map(|entry| entry.state())
            .unwrap_or_else(QueryState::idle)
    }

    pub fn status(&self, key: &QueryKey) -> QueryStatus {
        self.read()
            .get(key)
            .map_or(QueryStatus::Idle, |entry| entry.status)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drops every entry. Used at shutdown.
    pub fn clear(&self) {
        self.write().clear();
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
