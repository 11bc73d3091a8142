//! In-memory collaborators shared by the service and query tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use loothound_stash_api::{
    MapMetadata, StashApiError, StashItem, StashMetadata, StashProvider, StashSummary, StashTab,
};

use crate::errors::{DatabaseError, Error, Result};
use crate::items::Item;
use crate::profiles::{NewProfile, Profile, ProfileRepositoryTrait, ProfileUpdate};
use crate::snapshots::{Snapshot, SnapshotRepositoryTrait};

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 8, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn not_found(what: &str, id: i64) -> Error {
    Error::Database(DatabaseError::NotFound(format!("{} {}", what, id)))
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<Vec<Profile>>,
    pub list_calls: AtomicUsize,
}

impl InMemoryProfileRepository {
    pub fn with_profile(league: &str, stash_ids: &[&str]) -> Self {
        let repo = Self::default();
        repo.insert(NewProfile {
            name: "Main".to_string(),
            league: league.to_string(),
            stash_ids: stash_ids.iter().map(|s| s.to_string()).collect(),
        });
        repo
    }

    fn insert(&self, new_profile: NewProfile) -> Profile {
        let mut profiles = self.profiles.lock().unwrap();
        let id = profiles.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let profile = Profile {
            id,
            name: new_profile.name,
            league: new_profile.league,
            stash_ids: new_profile.stash_ids,
            created_at: base_time(),
            updated_at: base_time(),
        };
        profiles.push(profile.clone());
        profile
    }
}

#[async_trait]
impl ProfileRepositoryTrait for InMemoryProfileRepository {
    async fn create(&self, new_profile: NewProfile) -> Result<Profile> {
        Ok(self.insert(new_profile))
    }

    async fn update(&self, update: ProfileUpdate) -> Result<Profile> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == update.id)
            .ok_or_else(|| not_found("profile", update.id))?;
        profile.name = update.name;
        profile.league = update.league;
        profile.stash_ids = update.stash_ids;
        profile.updated_at = profile.updated_at + Duration::minutes(1);
        Ok(profile.clone())
    }

    async fn delete(&self, profile_id: i64) -> Result<usize> {
        let mut profiles = self.profiles.lock().unwrap();
        let before = profiles.len();
        profiles.retain(|p| p.id != profile_id);
        Ok(before - profiles.len())
    }

    async fn get_by_id(&self, profile_id: i64) -> Result<Profile> {
        self.profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == profile_id)
            .cloned()
            .ok_or_else(|| not_found("profile", profile_id))
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.profiles.lock().unwrap().clone())
    }
}

/// Snapshot store that stamps each new snapshot one minute after the last.
#[derive(Default)]
pub struct InMemorySnapshotRepository {
    snapshots: Mutex<Vec<Snapshot>>,
    items: Mutex<Vec<(i64, Item)>>,
    pub fail_attach_for: Option<String>,
    pub fail_create: bool,
    pub fail_list: bool,
    pub pricing_revision: i64,
    pub list_calls: AtomicUsize,
    pub item_list_calls: AtomicUsize,
}

impl InMemorySnapshotRepository {
    pub fn new(pricing_revision: i64) -> Self {
        Self {
            pricing_revision,
            ..Default::default()
        }
    }

    pub fn failing_attach(stash_id: &str) -> Self {
        Self {
            fail_attach_for: Some(stash_id.to_string()),
            pricing_revision: 1,
            ..Default::default()
        }
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            pricing_revision: 1,
            ..Default::default()
        }
    }

    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            pricing_revision: 1,
            ..Default::default()
        }
    }

    pub fn snapshot_count(&self) -> usize {
        self.snapshots.lock().unwrap().len()
    }

    pub fn stored_items(&self, snapshot_id: i64) -> Vec<Item> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| *id == snapshot_id)
            .map(|(_, item)| item.clone())
            .collect()
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for InMemorySnapshotRepository {
    async fn create_snapshot(&self, profile_id: i64) -> Result<Snapshot> {
        if self.fail_create {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "database is locked".to_string(),
            )));
        }
        let mut snapshots = self.snapshots.lock().unwrap();
        let id = snapshots.len() as i64 + 1;
        let snapshot = Snapshot {
            id,
            profile_id,
            created_at: base_time() + Duration::minutes(id),
            pricing_revision: self.pricing_revision,
        };
        snapshots.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn attach_items(
        &self,
        snapshot_id: i64,
        stash_id: &str,
        items: Vec<Item>,
    ) -> Result<usize> {
        if self.fail_attach_for.as_deref() == Some(stash_id) {
            return Err(Error::Database(DatabaseError::ForeignKeyViolation(
                format!("stash {}", stash_id),
            )));
        }
        let count = items.len();
        let mut stored = self.items.lock().unwrap();
        stored.extend(items.into_iter().map(|item| (snapshot_id, item)));
        Ok(count)
    }

    async fn list_snapshots(&self, profile_id: i64) -> Result<Vec<Snapshot>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "disk I/O error".to_string(),
            )));
        }
        let mut snapshots: Vec<Snapshot> = self
            .snapshots
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.profile_id == profile_id)
            .cloned()
            .collect();
        snapshots.reverse();
        Ok(snapshots)
    }

    async fn list_snapshot_items(&self, snapshot_id: i64) -> Result<Vec<Item>> {
        self.item_list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stored_items(snapshot_id))
    }
}

/// Stash provider serving fixed tabs.
#[derive(Default)]
pub struct FixtureStashProvider {
    tabs: HashMap<String, StashTab>,
    pub unreachable: bool,
    pub fetch_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl FixtureStashProvider {
    pub fn new(tabs: Vec<StashTab>) -> Self {
        Self {
            tabs: tabs.into_iter().map(|t| (t.id.clone(), t)).collect(),
            ..Default::default()
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl StashProvider for FixtureStashProvider {
    fn id(&self) -> &'static str {
        "FIXTURE"
    }

    async fn list_stashes(&self, _league: &str) -> std::result::Result<Vec<StashSummary>, StashApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(StashApiError::Timeout);
        }
        let mut summaries: Vec<StashSummary> = self.tabs.values().map(StashSummary::from).collect();
        summaries.sort_by_key(|s| s.index);
        Ok(summaries)
    }

    async fn fetch_stash(
        &self,
        _league: &str,
        stash_id: &str,
    ) -> std::result::Result<StashTab, StashApiError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return Err(StashApiError::Timeout);
        }
        self.tabs
            .get(stash_id)
            .cloned()
            .ok_or_else(|| StashApiError::NotFound(stash_id.to_string()))
    }
}

pub fn raw_item(type_line: &str) -> StashItem {
    StashItem {
        id: Some(format!("item-{}", type_line)),
        w: Some(1),
        h: Some(2),
        icon: Some(format!("{}.png", type_line)),
        type_line: Some(type_line.to_string()),
        base_type: Some(type_line.to_string()),
        identified: Some(true),
        frame_type: Some(1),
        ..Default::default()
    }
}

pub fn generic_tab(id: &str, index: u32, type_lines: &[&str]) -> StashTab {
    StashTab {
        id: id.to_string(),
        parent: None,
        name: id.to_uppercase(),
        stash_type: "NormalStash".to_string(),
        index: Some(index),
        metadata: StashMetadata::default(),
        children: None,
        items: Some(type_lines.iter().map(|t| raw_item(t)).collect()),
    }
}

pub fn map_tab(id: &str, index: u32, maps: &[Option<&str>]) -> StashTab {
    let children = maps
        .iter()
        .enumerate()
        .map(|(i, name)| StashTab {
            id: format!("{}-{}", id, i),
            parent: Some(id.to_string()),
            name: String::new(),
            stash_type: "MapStash".to_string(),
            index: None,
            metadata: StashMetadata {
                map: name.map(|n| MapMetadata {
                    name: Some(n.to_string()),
                    image: Some(format!("{}.png", n)),
                    section: None,
                    tier: Some(3),
                    series: None,
                }),
                ..Default::default()
            },
            children: None,
            items: None,
        })
        .collect();

    StashTab {
        id: id.to_string(),
        parent: None,
        name: "Maps".to_string(),
        stash_type: "MapStash".to_string(),
        index: Some(index),
        metadata: StashMetadata::default(),
        children: Some(children),
        items: None,
    }
}
