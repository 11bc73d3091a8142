use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use loothound_core::items::Item;
use loothound_core::snapshots::{Snapshot, SnapshotRepositoryTrait};
use loothound_core::Result;

use super::model::{NewSnapshotDB, NewSnapshotItemDB, SnapshotDB, SnapshotItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{snapshot_items, snapshots};

pub struct SnapshotRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
    /// Stamped on every snapshot this repository creates.
    pricing_revision: i64,
}

impl SnapshotRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle, pricing_revision: i64) -> Self {
        SnapshotRepository {
            pool,
            writer,
            pricing_revision,
        }
    }

    fn list_snapshots_impl(&self, owner_id: i64) -> Result<Vec<Snapshot>> {
        let mut conn = get_connection(&self.pool)?;
        let snapshots_db = snapshots::table
            .filter(snapshots::profile_id.eq(owner_id))
            .order((snapshots::created_at.desc(), snapshots::id.desc()))
            .select(SnapshotDB::as_select())
            .load::<SnapshotDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(snapshots_db.into_iter().map(Snapshot::from).collect())
    }

    fn list_snapshot_items_impl(&self, target_snapshot_id: i64) -> Result<Vec<Item>> {
        let mut conn = get_connection(&self.pool)?;
        let items_db = snapshot_items::table
            .filter(snapshot_items::snapshot_id.eq(target_snapshot_id))
            .order(snapshot_items::id.asc())
            .select(SnapshotItemDB::as_select())
            .load::<SnapshotItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(items_db.into_iter().map(Item::from).collect())
    }
}

#[async_trait]
impl SnapshotRepositoryTrait for SnapshotRepository {
    async fn create_snapshot(&self, owner_id: i64) -> Result<Snapshot> {
        let new_snapshot = NewSnapshotDB {
            profile_id: owner_id,
            created_at: Utc::now().naive_utc(),
            pricing_revision: self.pricing_revision,
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Snapshot> {
                let result_db = diesel::insert_into(snapshots::table)
                    .values(&new_snapshot)
                    .returning(SnapshotDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Snapshot::from(result_db))
            })
            .await
    }

    async fn attach_items(
        &self,
        target_snapshot_id: i64,
        source_stash_id: &str,
        items: Vec<Item>,
    ) -> Result<usize> {
        if items.is_empty() {
            return Ok(0);
        }
        let rows: Vec<NewSnapshotItemDB> = items
            .into_iter()
            .map(|item| NewSnapshotItemDB::from_domain(target_snapshot_id, source_stash_id, item))
            .collect();
        let stash = source_stash_id.to_string();

        let inserted = self
            .writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::insert_into(snapshot_items::table)
                    .values(&rows)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await?;
        debug!(
            "Stored {} items from stash {} in snapshot {}",
            inserted, stash, target_snapshot_id
        );
        Ok(inserted)
    }

    async fn list_snapshots(&self, owner_id: i64) -> Result<Vec<Snapshot>> {
        self.list_snapshots_impl(owner_id)
    }

    async fn list_snapshot_items(&self, target_snapshot_id: i64) -> Result<Vec<Item>> {
        self.list_snapshot_items_impl(target_snapshot_id)
    }
}
