//! Query cache module.
//!
//! A read-through cache in front of the repositories. Reads go through
//! [`QueryCache::fetch`]; write paths call [`QueryCache::invalidate`] so the
//! next read refetches. Entries never expire by time.

mod queries;
mod query_cache;
mod query_model;

pub use queries::LootQueries;
pub use query_cache::{QueryCache, SharedQueryCache};
pub use query_model::{QueryKey, QueryKind, QueryListener, QueryOptions, QueryState, QueryStatus};
