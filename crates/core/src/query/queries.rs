//! Typed reads served through the query cache.

use std::sync::Arc;

use loothound_stash_api::{StashProvider, StashSummary};

use super::query_cache::SharedQueryCache;
use super::query_model::{QueryKey, QueryKind, QueryListener, QueryOptions, QueryState};
use crate::errors::{Error, ValidationError};
use crate::items::Item;
use crate::profiles::{Profile, ProfileRepositoryTrait};
use crate::snapshots::{Snapshot, SnapshotHistory, SnapshotRepositoryTrait, SnapshotStats};

fn required<T>(value: Option<T>, field: &str) -> crate::errors::Result<T> {
    value.ok_or_else(|| Error::from(ValidationError::MissingField(field.to_string())))
}

/// Read side of the application.
///
/// Every read goes through the shared [`QueryCache`](super::QueryCache).
/// A read whose input is missing (no profile selected, no snapshot yet) is
/// disabled and reports idle instead of fetching.
pub struct LootQueries {
    cache: SharedQueryCache,
    profiles: Arc<dyn ProfileRepositoryTrait>,
    snapshots: Arc<dyn SnapshotRepositoryTrait>,
    stash_provider: Arc<dyn StashProvider>,
}

impl LootQueries {
    pub fn new(
        cache: SharedQueryCache,
        profiles: Arc<dyn ProfileRepositoryTrait>,
        snapshots: Arc<dyn SnapshotRepositoryTrait>,
        stash_provider: Arc<dyn StashProvider>,
    ) -> Self {
        Self {
            cache,
            profiles,
            snapshots,
            stash_provider,
        }
    }

    pub fn cache(&self) -> &SharedQueryCache {
        &self.cache
    }

    pub async fn profiles(&self) -> QueryState<Vec<Profile>> {
        let repository = Arc::clone(&self.profiles);
        self.cache
            .fetch(
                QueryKey::new(QueryKind::Profiles),
                QueryOptions::default(),
                || async move { repository.list().await },
            )
            .await
    }

    /// Snapshots of a profile, newest first.
    pub async fn snapshots(&self, profile_id: Option<i64>) -> QueryState<Vec<Snapshot>> {
        let repository = Arc::clone(&self.snapshots);
        self.cache
            .fetch(
                keyed_or_kind(QueryKind::Snapshots, profile_id),
                QueryOptions::enabled(profile_id.is_some()),
                || async move {
                    let profile_id = required(profile_id, "profile_id")?;
                    let snapshots = repository.list_snapshots(profile_id).await?;
                    Ok(SnapshotHistory::new(snapshots).into_inner())
                },
            )
            .await
    }

    /// Items of one snapshot. `listener` receives each freshly fetched list.
    pub async fn snapshot_items(
        &self,
        snapshot_id: Option<i64>,
        listener: Option<QueryListener<Vec<Item>>>,
    ) -> QueryState<Vec<Item>> {
        let repository = Arc::clone(&self.snapshots);
        self.cache
            .fetch(
                keyed_or_kind(QueryKind::SnapshotItems, snapshot_id),
                QueryOptions::enabled(snapshot_id.is_some()).on_success(listener),
                || async move {
                    let snapshot_id = required(snapshot_id, "snapshot_id")?;
                    repository.list_snapshot_items(snapshot_id).await
                },
            )
            .await
    }

    /// Items of the profile's newest snapshot.
    ///
    /// Dependent read: stays idle until the snapshot list has resolved to at
    /// least one snapshot. A snapshot list that failed without any cached
    /// value is reported as this read's error.
    pub async fn latest_snapshot_items(
        &self,
        profile_id: Option<i64>,
        listener: Option<QueryListener<Vec<Item>>>,
    ) -> QueryState<Vec<Item>> {
        let snapshots = self.snapshots(profile_id).await;
        if snapshots.is_error() && snapshots.data.is_none() {
            return snapshots.map(|_| Vec::new());
        }
        let latest_id = snapshots
            .data
            .as_ref()
            .and_then(|list| list.first())
            .map(|s| s.id);
        self.snapshot_items(latest_id, listener).await
    }

    pub async fn snapshot_stats(&self, profile_id: Option<i64>) -> QueryState<SnapshotStats> {
        self.snapshots(profile_id)
            .await
            .map(|snapshots| SnapshotStats::from(&SnapshotHistory::new(snapshots)))
    }

    /// Stash tabs available in a league.
    pub async fn stashes(&self, league: Option<&str>) -> QueryState<Vec<StashSummary>> {
        let league = league
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        let provider = Arc::clone(&self.stash_provider);
        let key = match &league {
            Some(league) => QueryKey::keyed(QueryKind::Stashes, league),
            None => QueryKey::new(QueryKind::Stashes),
        };
        self.cache
            .fetch(
                key,
                QueryOptions::enabled(league.is_some()),
                || async move {
                    let league = required(league, "league")?;
                    Ok(provider.list_stashes(&league).await?)
                },
            )
            .await
    }
}

fn keyed_or_kind(kind: QueryKind, id: Option<i64>) -> QueryKey {
    match id {
        Some(id) => QueryKey::keyed(kind, id),
        None => QueryKey::new(kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryCache, QueryStatus};
    use crate::snapshots::{SnapshotServiceTrait, SnapshotService, Trend};
    use crate::test_fixtures::{
        generic_tab, FixtureStashProvider, InMemoryProfileRepository, InMemorySnapshotRepository,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Harness {
        cache: SharedQueryCache,
        profiles: Arc<InMemoryProfileRepository>,
        snapshots: Arc<InMemorySnapshotRepository>,
        provider: Arc<FixtureStashProvider>,
        queries: LootQueries,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_snapshots(InMemorySnapshotRepository::new(2))
        }

        fn with_snapshots(snapshots: InMemorySnapshotRepository) -> Self {
            let cache = QueryCache::shared();
            let profiles = Arc::new(InMemoryProfileRepository::with_profile(
                "Settlers",
                &["a", "b"],
            ));
            let snapshots = Arc::new(snapshots);
            let provider = Arc::new(FixtureStashProvider::new(vec![
                generic_tab("a", 0, &["Chaos Orb", "Divine Orb"]),
                generic_tab("b", 1, &["Mirror of Kalandra"]),
            ]));
            let queries = LootQueries::new(
                cache.clone(),
                profiles.clone(),
                snapshots.clone(),
                provider.clone(),
            );
            Self {
                cache,
                profiles,
                snapshots,
                provider,
                queries,
            }
        }

        fn service(&self) -> SnapshotService {
            SnapshotService::new(
                self.profiles.clone(),
                self.snapshots.clone(),
                self.provider.clone(),
                self.cache.clone(),
            )
        }
    }

    #[tokio::test]
    async fn test_disabled_reads_never_fetch() {
        let h = Harness::new();

        let snapshots = h.queries.snapshots(None).await;
        let items = h.queries.snapshot_items(None, None).await;
        let stats = h.queries.snapshot_stats(None).await;
        let stashes = h.queries.stashes(Some("  ")).await;

        assert!(snapshots.is_idle());
        assert!(items.is_idle());
        assert!(stats.is_idle());
        assert!(stashes.is_idle());
        assert_eq!(h.snapshots.list_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.snapshots.item_list_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.provider.list_calls.load(Ordering::SeqCst), 0);
        assert!(h.cache.is_empty());
    }

    #[tokio::test]
    async fn test_profiles_are_cached_until_invalidated() {
        let h = Harness::new();

        let first = h.queries.profiles().await;
        let second = h.queries.profiles().await;
        assert_eq!(first.status, QueryStatus::Fresh);
        assert_eq!(second.data.map(|p| p.len()), Some(1));
        assert_eq!(h.profiles.list_calls.load(Ordering::SeqCst), 1);

        h.cache.invalidate(QueryKind::Profiles, None);
        h.queries.profiles().await;
        assert_eq!(h.profiles.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_latest_items_wait_for_a_snapshot() {
        let h = Harness::new();

        let state = h.queries.latest_snapshot_items(Some(1), None).await;
        assert!(state.is_idle());
        assert_eq!(h.snapshots.item_list_calls.load(Ordering::SeqCst), 0);

        h.service().take_snapshot(Some(1)).await.unwrap();

        let state = h.queries.latest_snapshot_items(Some(1), None).await;
        assert_eq!(state.status, QueryStatus::Fresh);
        assert_eq!(state.data.map(|items| items.len()), Some(3));
    }

    #[tokio::test]
    async fn test_latest_items_reports_failed_snapshot_list() {
        let h = Harness::with_snapshots(InMemorySnapshotRepository::failing_list());

        let state = h.queries.latest_snapshot_items(Some(1), None).await;
        assert_eq!(state.status, QueryStatus::Error);
        assert!(state.data.is_none());
        assert!(state
            .error
            .as_deref()
            .is_some_and(|message| message.contains("disk I/O error")));
        assert_eq!(h.snapshots.item_list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_latest_items_listener_fires_once_per_fetch() {
        let h = Harness::new();
        h.service().take_snapshot(Some(1)).await.unwrap();

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let listener: QueryListener<Vec<Item>> = {
            let calls = calls.clone();
            let seen = seen.clone();
            Arc::new(move |items: &Vec<Item>| {
                calls.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push(items.len());
            })
        };

        h.queries
            .latest_snapshot_items(Some(1), Some(listener.clone()))
            .await;
        h.queries
            .latest_snapshot_items(Some(1), Some(listener.clone()))
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        h.service().take_snapshot(Some(1)).await.unwrap();
        h.queries
            .latest_snapshot_items(Some(1), Some(listener))
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*seen.lock().unwrap(), vec![3, 3]);
    }

    #[tokio::test]
    async fn test_snapshot_stats_follow_snapshot_list() {
        let h = Harness::new();

        let empty = h.queries.snapshot_stats(Some(1)).await;
        assert_eq!(empty.data.map(|s| s.diff), Some(0));

        let service = h.service();
        service.take_snapshot(Some(1)).await.unwrap();
        let one = h.queries.snapshot_stats(Some(1)).await.data.unwrap();
        assert_eq!((one.snapshot_count, one.diff), (1, 2));

        service.take_snapshot(Some(1)).await.unwrap();
        let two = h.queries.snapshot_stats(Some(1)).await.data.unwrap();
        assert_eq!(two.snapshot_count, 2);
        assert_eq!(two.diff, 4);
        assert_eq!(two.trend, Some(Trend::Up));
    }

    #[tokio::test]
    async fn test_stashes_cached_per_league() {
        let h = Harness::new();

        let state = h.queries.stashes(Some("Settlers")).await;
        let ids: Vec<String> = state.data.unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["a", "b"]);

        h.queries.stashes(Some("Settlers")).await;
        h.queries.stashes(Some("Standard")).await;
        assert_eq!(h.provider.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stash_transport_error_is_reported() {
        let cache = QueryCache::shared();
        let queries = LootQueries::new(
            cache,
            Arc::new(InMemoryProfileRepository::default()),
            Arc::new(InMemorySnapshotRepository::default()),
            Arc::new(FixtureStashProvider::unreachable()),
        );

        let state = queries.stashes(Some("Settlers")).await;
        assert!(state.is_error());
        assert!(state.data.is_none());
        assert!(state.error.unwrap().contains("timed out"));
    }
}
