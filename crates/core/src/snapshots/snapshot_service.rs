use std::sync::Arc;

use log::{debug, error, info, warn};
use loothound_stash_api::StashProvider;

use super::aggregation::aggregate;
use super::snapshot_model::{Snapshot, SnapshotOutcome};
use super::snapshot_stats::{SnapshotHistory, SnapshotStats};
use super::snapshot_traits::{SnapshotRepositoryTrait, SnapshotServiceTrait};
use crate::errors::{Error, Result, ValidationError};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::items::Item;
use crate::profiles::ProfileRepositoryTrait;
use crate::query::{QueryKind, SharedQueryCache};
use crate::stash::StashContainer;

/// Captures snapshots and keeps the query cache in step with the writes.
///
/// This is the only writer of snapshot and snapshot item cache entries.
pub struct SnapshotService {
    profile_repository: Arc<dyn ProfileRepositoryTrait>,
    snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
    stash_provider: Arc<dyn StashProvider>,
    query_cache: SharedQueryCache,
    event_sink: Arc<dyn DomainEventSink>,
}

impl SnapshotService {
    pub fn new(
        profile_repository: Arc<dyn ProfileRepositoryTrait>,
        snapshot_repository: Arc<dyn SnapshotRepositoryTrait>,
        stash_provider: Arc<dyn StashProvider>,
        query_cache: SharedQueryCache,
    ) -> Self {
        Self {
            profile_repository,
            snapshot_repository,
            stash_provider,
            query_cache,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    /// Sets the domain event sink for emitting SnapshotTaken events.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    fn invalidate_snapshots(&self, profile_id: i64) {
        let key = profile_id.to_string();
        self.query_cache
            .invalidate(QueryKind::Snapshots, Some(key.as_str()));
    }
}

#[async_trait::async_trait]
impl SnapshotServiceTrait for SnapshotService {
    /// Creates the snapshot row first, then fetches and attaches the
    /// profile's stash tabs.
    ///
    /// A transport failure aborts after the row exists, leaving an empty
    /// snapshot behind. Per-tab attach failures are reported in the outcome.
    async fn take_snapshot(&self, profile_id: Option<i64>) -> Result<SnapshotOutcome> {
        let profile_id = profile_id
            .ok_or_else(|| ValidationError::MissingField("profile_id".to_string()))?;
        let profile = self.profile_repository.get_by_id(profile_id).await?;

        let snapshot = self.snapshot_repository.create_snapshot(profile.id).await?;
        info!(
            "Created snapshot {} for profile {} ({} stash tabs)",
            snapshot.id,
            profile.id,
            profile.stash_ids.len()
        );
        self.invalidate_snapshots(profile.id);

        let tabs = match self
            .stash_provider
            .fetch_stashes(&profile.league, &profile.stash_ids)
            .await
        {
            Ok(tabs) => tabs,
            Err(err) => {
                error!(
                    "Failed to fetch stash tabs from {} for snapshot {}: {}",
                    self.stash_provider.id(),
                    snapshot.id,
                    err
                );
                return Err(Error::StashFetch(err));
            }
        };
        let containers: Vec<StashContainer> = tabs.into_iter().map(StashContainer::from).collect();

        let outcome = aggregate(self.snapshot_repository.as_ref(), snapshot.id, &containers).await;
        if outcome.failures.is_empty() {
            debug!(
                "Snapshot {} complete with {} items",
                snapshot.id,
                outcome.items.len()
            );
        } else {
            warn!(
                "Snapshot {} is partial: {} of {} stash tabs failed",
                snapshot.id,
                outcome.failures.len(),
                containers.len()
            );
        }

        let snapshot_key = snapshot.id.to_string();
        self.query_cache
            .invalidate(QueryKind::SnapshotItems, Some(snapshot_key.as_str()));
        self.invalidate_snapshots(profile.id);

        let result = SnapshotOutcome {
            snapshot,
            items: outcome.items,
            failures: outcome.failures,
        };
        self.event_sink.emit(DomainEvent::snapshot_taken(
            profile.id,
            result.snapshot.id,
            result.items.len(),
            result.failed_stash_ids(),
        ));

        Ok(result)
    }

    async fn list_snapshots(&self, profile_id: i64) -> Result<Vec<Snapshot>> {
        let snapshots = self.snapshot_repository.list_snapshots(profile_id).await?;
        Ok(SnapshotHistory::new(snapshots).into_inner())
    }

    async fn snapshot_items(&self, snapshot_id: i64) -> Result<Vec<Item>> {
        self.snapshot_repository.list_snapshot_items(snapshot_id).await
    }

    async fn snapshot_stats(&self, profile_id: i64) -> Result<SnapshotStats> {
        let snapshots = self.snapshot_repository.list_snapshots(profile_id).await?;
        Ok(SnapshotStats::from(&SnapshotHistory::new(snapshots)))
    }
}
