//! Query cache keys and states.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity kinds served through the query cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Profiles,
    Snapshots,
    SnapshotItems,
    Stashes,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryKind::Profiles => "profiles",
            QueryKind::Snapshots => "snapshots",
            QueryKind::SnapshotItems => "snapshot_items",
            QueryKind::Stashes => "stashes",
        };
        f.write_str(name)
    }
}

/// Cache key: entity kind, optional entity key, optional sub-key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: QueryKind,
    pub key: Option<String>,
    pub sub_key: Option<String>,
}

impl QueryKey {
    pub fn new(kind: QueryKind) -> Self {
        Self {
            kind,
            key: None,
            sub_key: None,
        }
    }

    pub fn keyed(kind: QueryKind, key: impl ToString) -> Self {
        Self {
            kind,
            key: Some(key.to_string()),
            sub_key: None,
        }
    }

    pub fn with_sub_key(mut self, sub_key: impl ToString) -> Self {
        self.sub_key = Some(sub_key.to_string());
        self
    }

    /// Whether an invalidation of `(kind, key)` applies to this key.
    ///
    /// A `None` key matches every entry of the kind.
    pub fn matches(&self, kind: QueryKind, key: Option<&str>) -> bool {
        self.kind == kind && key.map_or(true, |k| self.key.as_deref() == Some(k))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(key) = &self.key {
            write!(f, "/{}", key)?;
        }
        if let Some(sub_key) = &self.sub_key {
            write!(f, "/{}", sub_key)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    /// Never fetched, or the read is disabled
    Idle,
    Fetching,
    Fresh,
    /// Invalidated by a write; the next read refetches
    Stale,
    Error,
}

/// Result of a cache read.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState<T> {
    pub status: QueryStatus,
    /// Last known good value, kept across errors and invalidations
    pub data: Option<T>,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> QueryState<T> {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            data: None,
            error: None,
            updated_at: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.status == QueryStatus::Idle
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            status: self.status,
            data: self.data.map(f),
            error: self.error,
            updated_at: self.updated_at,
        }
    }
}

/// Callback pushed every successfully fetched value.
pub type QueryListener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Per-read options.
pub struct QueryOptions<T> {
    /// Disabled reads never fetch and report [`QueryStatus::Idle`]
    pub enabled: bool,
    pub on_success: Option<QueryListener<T>>,
}

impl<T> QueryOptions<T> {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled,
            on_success: None,
        }
    }

    pub fn on_success(mut self, listener: Option<QueryListener<T>>) -> Self {
        self.on_success = listener;
        self
    }
}

impl<T> Default for QueryOptions<T> {
    fn default() -> Self {
        Self::enabled(true)
    }
}

impl<T> Clone for QueryOptions<T> {
    fn clone(&self) -> Self {
        Self {
            enabled: self.enabled,
            on_success: self.on_success.clone(),
        }
    }
}
