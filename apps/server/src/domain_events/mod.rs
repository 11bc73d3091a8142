//! Domain events runtime bridge for the web server.
//!
//! The headless server has no UI to refresh, so events are written to the
//! structured log where operators and log shippers can pick them up.

use loothound_core::events::{DomainEvent, DomainEventSink};

#[derive(Clone, Default)]
pub struct TracingDomainEventSink;

impl TracingDomainEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl DomainEventSink for TracingDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        match &event {
            DomainEvent::SnapshotTaken {
                profile_id,
                snapshot_id,
                item_count,
                failed_stash_ids,
            } if !failed_stash_ids.is_empty() => {
                tracing::warn!(
                    profile_id,
                    snapshot_id,
                    item_count,
                    failed = ?failed_stash_ids,
                    "snapshot taken with failed stash tabs"
                );
            }
            DomainEvent::SnapshotTaken {
                profile_id,
                snapshot_id,
                item_count,
                ..
            } => {
                tracing::info!(profile_id, snapshot_id, item_count, "snapshot taken");
            }
            DomainEvent::ProfilesChanged { profile_ids } => {
                tracing::info!(profile_ids = ?profile_ids, "profiles changed");
            }
        }
    }
}
