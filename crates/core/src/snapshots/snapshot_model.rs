//! Snapshot domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::aggregation::AttachFailure;
use crate::items::Item;

/// A point-in-time capture of a profile's stash contents.
///
/// `pricing_revision` is stamped by the repository when the row is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: i64,
    pub profile_id: i64,
    pub created_at: NaiveDateTime,
    pub pricing_revision: i64,
}

/// Result of a `take_snapshot` run.
///
/// `items` holds only the items that were persisted; tabs listed in
/// `failures` contributed nothing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotOutcome {
    pub snapshot: Snapshot,
    pub items: Vec<Item>,
    pub failures: Vec<AttachFailure>,
}

impl SnapshotOutcome {
    pub fn failed_stash_ids(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.stash_id.clone()).collect()
    }

    /// True when every fetched tab was attached.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
