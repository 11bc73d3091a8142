//! Domain event types.

use serde::{Deserialize, Serialize};

/// Domain events emitted by core services after successful mutations.
///
/// Runtime adapters translate them into platform-specific actions
/// (notifications, UI refresh, logging).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Profiles were created, updated, or deleted.
    ProfilesChanged { profile_ids: Vec<i64> },

    /// A snapshot was captured for a profile.
    SnapshotTaken {
        profile_id: i64,
        snapshot_id: i64,
        item_count: usize,
        /// Stash tabs whose items could not be attached
        failed_stash_ids: Vec<String>,
    },
}

impl DomainEvent {
    /// Creates a ProfilesChanged event.
    pub fn profiles_changed(profile_ids: Vec<i64>) -> Self {
        Self::ProfilesChanged { profile_ids }
    }

    /// Creates a SnapshotTaken event.
    pub fn snapshot_taken(
        profile_id: i64,
        snapshot_id: i64,
        item_count: usize,
        failed_stash_ids: Vec<String>,
    ) -> Self {
        Self::SnapshotTaken {
            profile_id,
            snapshot_id,
            item_count,
            failed_stash_ids,
        }
    }
}
