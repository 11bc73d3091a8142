//! LootHound Core - Domain entities, services, and traits.
//!
//! This crate contains the snapshot logic for LootHound: stash
//! normalization, snapshot aggregation, the query cache and snapshot
//! statistics. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate; stash tabs come in through
//! the `StashProvider` trait of the `stash-api` crate.

pub mod constants;
pub mod errors;
pub mod events;
pub mod items;
pub mod profiles;
pub mod query;
pub mod snapshots;
pub mod stash;

#[cfg(test)]
mod test_fixtures;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
