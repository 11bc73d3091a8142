//! Snapshots module - capture, aggregation, history statistics.

mod aggregation;
mod snapshot_model;
mod snapshot_service;
mod snapshot_stats;
mod snapshot_traits;


pub use aggregation::{aggregate, AggregationOutcome, AttachFailure};
pub use snapshot_model::{Snapshot, SnapshotOutcome};
pub use snapshot_service::SnapshotService;
pub use snapshot_stats::{compare_snapshots, SnapshotHistory, SnapshotStats, Trend};
pub use snapshot_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};
