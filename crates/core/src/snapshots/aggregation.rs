//! Aggregation pipeline.
//!
//! Walks the fetched stash tabs in order, normalizes each one and attaches
//! its items to the snapshot. Tabs are processed strictly one after another;
//! a failed attach is recorded and the walk continues.

use std::collections::HashSet;

use log::{debug, warn};
use serde::Serialize;

use super::snapshot_traits::SnapshotRepositoryTrait;
use crate::items::Item;
use crate::stash::{normalize, StashContainer};

/// A stash tab whose items could not be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachFailure {
    pub stash_id: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct AggregationOutcome {
    /// Items that were persisted, in tab order.
    pub items: Vec<Item>,
    pub attached_stash_ids: Vec<String>,
    pub failures: Vec<AttachFailure>,
}

/// Attaches the items of every tab in `containers` to `snapshot_id`.
///
/// Tabs that normalize to nothing are not attached. A tab id seen twice in
/// the same run is attached only the first time.
pub async fn aggregate(
    repository: &dyn SnapshotRepositoryTrait,
    snapshot_id: i64,
    containers: &[StashContainer],
) -> AggregationOutcome {
    let mut outcome = AggregationOutcome::default();
    let mut seen: HashSet<&str> = HashSet::with_capacity(containers.len());

    for container in containers {
        let stash_id = container.id();
        if !seen.insert(stash_id) {
            warn!(
                "Stash {} listed twice for snapshot {}, skipping duplicate",
                stash_id, snapshot_id
            );
            continue;
        }

        let items = normalize(container);
        if items.is_empty() {
            debug!("Stash {} has no items, nothing to attach", stash_id);
            continue;
        }

        match repository
            .attach_items(snapshot_id, stash_id, items.clone())
            .await
        {
            Ok(count) => {
                debug!(
                    "Attached {} items from stash {} to snapshot {}",
                    count, stash_id, snapshot_id
                );
                outcome.attached_stash_ids.push(stash_id.to_string());
                outcome.items.extend(items);
            }
            Err(err) => {
                warn!(
                    "Failed to attach stash {} to snapshot {}: {}",
                    stash_id, snapshot_id, err
                );
                outcome.failures.push(AttachFailure {
                    stash_id: stash_id.to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    outcome
}
