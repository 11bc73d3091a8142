//! Snapshot history comparison.

use serde::{Deserialize, Serialize};

use super::snapshot_model::Snapshot;

/// Snapshots of one profile, always ordered newest first.
///
/// Construction sorts by `created_at` descending, breaking ties on the
/// higher id, so callers cannot hand an unordered list to
/// [`compare_snapshots`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotHistory(Vec<Snapshot>);

impl SnapshotHistory {
    pub fn new(mut snapshots: Vec<Snapshot>) -> Self {
        snapshots.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Self(snapshots)
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Snapshot] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Snapshot> {
        self.0
    }
}

impl From<Vec<Snapshot>> for SnapshotHistory {
    fn from(snapshots: Vec<Snapshot>) -> Self {
        Self::new(snapshots)
    }
}

/// Compares the two most recent snapshots.
///
/// No snapshots yields 0 and a single snapshot yields its own pricing
/// revision. Otherwise the result is the sum of the two newest pricing
/// revisions, saturating at the `i64` bounds.
pub fn compare_snapshots(history: &SnapshotHistory) -> i64 {
    match history.as_slice() {
        [] => 0,
        [only] => only.pricing_revision,
        [latest, previous, ..] => latest
            .pricing_revision
            .saturating_add(previous.pricing_revision),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Classifies a comparison value by sign; zero has no trend.
    pub fn from_diff(diff: i64) -> Option<Self> {
        match diff.signum() {
            1 => Some(Trend::Up),
            -1 => Some(Trend::Down),
            _ => None,
        }
    }
}

/// Summary shown on the profile stats card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotStats {
    pub snapshot_count: usize,
    pub diff: i64,
    pub trend: Option<Trend>,
}

impl From<&SnapshotHistory> for SnapshotStats {
    fn from(history: &SnapshotHistory) -> Self {
        let diff = compare_snapshots(history);
        Self {
            snapshot_count: history.len(),
            diff,
            trend: Trend::from_diff(diff),
        }
    }
}
