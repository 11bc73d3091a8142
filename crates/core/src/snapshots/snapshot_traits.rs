use async_trait::async_trait;

use super::snapshot_model::{Snapshot, SnapshotOutcome};
use super::snapshot_stats::SnapshotStats;
use crate::errors::Result;
use crate::items::Item;

/// Trait defining the contract for snapshot persistence.
#[async_trait]
pub trait SnapshotRepositoryTrait: Send + Sync {
    /// Creates an empty snapshot row for the profile.
    async fn create_snapshot(&self, profile_id: i64) -> Result<Snapshot>;

    /// Persists the items of one stash tab under a snapshot, all or nothing.
    /// Returns the number of rows written.
    async fn attach_items(&self, snapshot_id: i64, stash_id: &str, items: Vec<Item>)
        -> Result<usize>;

    /// Lists the snapshots of a profile, newest first.
    async fn list_snapshots(&self, profile_id: i64) -> Result<Vec<Snapshot>>;

    /// Lists the items attached to a snapshot in insertion order.
    async fn list_snapshot_items(&self, snapshot_id: i64) -> Result<Vec<Item>>;
}

/// Trait defining the contract for snapshot orchestration.
#[async_trait]
pub trait SnapshotServiceTrait: Send + Sync {
    /// Captures the profile's configured stash tabs into a new snapshot.
    async fn take_snapshot(&self, profile_id: Option<i64>) -> Result<SnapshotOutcome>;

    async fn list_snapshots(&self, profile_id: i64) -> Result<Vec<Snapshot>>;

    async fn snapshot_items(&self, snapshot_id: i64) -> Result<Vec<Item>>;

    async fn snapshot_stats(&self, profile_id: i64) -> Result<SnapshotStats>;
}
