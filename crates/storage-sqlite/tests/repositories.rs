use std::sync::Arc;

use loothound_core::items::Item;
use loothound_core::profiles::{NewProfile, ProfileRepositoryTrait, ProfileUpdate};
use loothound_core::snapshots::SnapshotRepositoryTrait;
use loothound_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, DbPool, ProfileRepository,
    SnapshotRepository,
};
use tempfile::TempDir;

struct TestDb {
    _dir: TempDir,
    pool: Arc<DbPool>,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("loothound.db");
    let db_path = init(path.to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    TestDb { _dir: dir, pool }
}

fn repositories(db: &TestDb, pricing_revision: i64) -> (ProfileRepository, SnapshotRepository) {
    let writer = spawn_writer((*db.pool).clone());
    (
        ProfileRepository::new(db.pool.clone(), writer.clone()),
        SnapshotRepository::new(db.pool.clone(), writer, pricing_revision),
    )
}

fn new_profile(name: &str) -> NewProfile {
    NewProfile {
        name: name.to_string(),
        league: "Settlers".to_string(),
        stash_ids: vec!["tab-b".to_string(), "tab-a".to_string()],
    }
}

fn item(type_line: &str, stack_size: Option<u32>) -> Item {
    Item {
        provider_id: Some(format!("id-{}", type_line)),
        verified: true,
        w: 2,
        h: 4,
        icon: format!("{}.png", type_line),
        name: String::new(),
        type_line: type_line.to_string(),
        base_type: type_line.to_string(),
        identified: true,
        ilvl: Some(83),
        frame_type: 3,
        stack_size,
        // Overwritten by the stash id passed to attach_items
        stash_id: "ignored".to_string(),
    }
}

#[tokio::test]
async fn test_profile_crud() {
    let db = setup();
    let (profiles, _) = repositories(&db, 1);

    let zed = profiles.create(new_profile("Zed")).await.unwrap();
    let alpha = profiles.create(new_profile("Alpha")).await.unwrap();
    assert_eq!(zed.stash_ids, vec!["tab-b", "tab-a"]);

    let listed: Vec<String> = profiles
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(listed, vec!["Alpha", "Zed"]);

    let updated = profiles
        .update(ProfileUpdate {
            id: alpha.id,
            name: "Alpha 2".to_string(),
            league: "Standard".to_string(),
            stash_ids: vec!["tab-c".to_string()],
        })
        .await
        .unwrap();
    assert_eq!(updated.league, "Standard");
    assert_eq!(profiles.get_by_id(alpha.id).await.unwrap(), updated);

    assert_eq!(profiles.delete(zed.id).await.unwrap(), 1);
    assert_eq!(profiles.delete(zed.id).await.unwrap(), 0);
    assert!(profiles.get_by_id(zed.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_update_missing_profile_is_not_found() {
    let db = setup();
    let (profiles, _) = repositories(&db, 1);

    let err = profiles
        .update(ProfileUpdate {
            id: 404,
            name: "Ghost".to_string(),
            league: "Standard".to_string(),
            stash_ids: vec!["a".to_string()],
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_snapshots_are_listed_newest_first() {
    let db = setup();
    let (profiles, snapshots) = repositories(&db, 7);
    let profile = profiles.create(new_profile("Main")).await.unwrap();

    let first = snapshots.create_snapshot(profile.id).await.unwrap();
    let second = snapshots.create_snapshot(profile.id).await.unwrap();
    assert_eq!(first.pricing_revision, 7);

    let listed = snapshots.list_snapshots(profile.id).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert!(snapshots.list_snapshots(profile.id + 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_attach_and_list_items() {
    let db = setup();
    let (profiles, snapshots) = repositories(&db, 1);
    let profile = profiles.create(new_profile("Main")).await.unwrap();
    let snapshot = snapshots.create_snapshot(profile.id).await.unwrap();

    let attached = snapshots
        .attach_items(
            snapshot.id,
            "tab-a",
            vec![item("Chaos Orb", Some(20)), item("Vaal Orb", None)],
        )
        .await
        .unwrap();
    assert_eq!(attached, 2);
    assert_eq!(
        snapshots.attach_items(snapshot.id, "tab-b", vec![]).await.unwrap(),
        0
    );
    snapshots
        .attach_items(snapshot.id, "tab-b", vec![item("Mirror Shard", Some(3))])
        .await
        .unwrap();

    let items = snapshots.list_snapshot_items(snapshot.id).await.unwrap();
    let stored: Vec<(&str, &str)> = items
        .iter()
        .map(|i| (i.stash_id.as_str(), i.type_line.as_str()))
        .collect();
    assert_eq!(
        stored,
        vec![
            ("tab-a", "Chaos Orb"),
            ("tab-a", "Vaal Orb"),
            ("tab-b", "Mirror Shard")
        ]
    );
    assert_eq!(items[0].stack_size, Some(20));
    assert_eq!(items[0].ilvl, Some(83));
    assert_eq!((items[1].w, items[1].h, items[1].frame_type), (2, 4, 3));
    assert_eq!(items[1].stack_size, None);
}

#[tokio::test]
async fn test_attach_to_unknown_snapshot_fails() {
    let db = setup();
    let (_, snapshots) = repositories(&db, 1);

    let result = snapshots
        .attach_items(999, "tab-a", vec![item("Chaos Orb", None)])
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_deleting_profile_cascades() {
    let db = setup();
    let (profiles, snapshots) = repositories(&db, 1);
    let profile = profiles.create(new_profile("Main")).await.unwrap();
    let snapshot = snapshots.create_snapshot(profile.id).await.unwrap();
    snapshots
        .attach_items(snapshot.id, "tab-a", vec![item("Chaos Orb", None)])
        .await
        .unwrap();

    profiles.delete(profile.id).await.unwrap();

    assert!(snapshots.list_snapshots(profile.id).await.unwrap().is_empty());
    assert!(snapshots
        .list_snapshot_items(snapshot.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = setup();
    run_migrations(&db.pool).unwrap();
}
