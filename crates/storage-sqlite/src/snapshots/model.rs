//! Database models for snapshots.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use loothound_core::items::Item;
use loothound_core::snapshots::Snapshot;

/// Database model for snapshots
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::snapshots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SnapshotDB {
    pub id: i64,
    pub profile_id: i64,
    pub created_at: NaiveDateTime,
    pub pricing_revision: i64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::snapshots)]
pub struct NewSnapshotDB {
    pub profile_id: i64,
    pub created_at: NaiveDateTime,
    pub pricing_revision: i64,
}

/// Database model for an item attached to a snapshot
#[derive(Queryable, Identifiable, Selectable, Associations, PartialEq, Debug, Clone)]
#[diesel(belongs_to(SnapshotDB, foreign_key = snapshot_id))]
#[diesel(table_name = crate::schema::snapshot_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SnapshotItemDB {
    pub id: i64,
    pub snapshot_id: i64,
    pub stash_id: String,
    pub provider_id: Option<String>,
    pub verified: bool,
    pub w: i32,
    pub h: i32,
    pub icon: String,
    pub name: String,
    pub type_line: String,
    pub base_type: String,
    pub identified: bool,
    pub ilvl: Option<i32>,
    pub frame_type: i32,
    pub stack_size: Option<i32>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::snapshot_items)]
pub struct NewSnapshotItemDB {
    pub snapshot_id: i64,
    pub stash_id: String,
    pub provider_id: Option<String>,
    pub verified: bool,
    pub w: i32,
    pub h: i32,
    pub icon: String,
    pub name: String,
    pub type_line: String,
    pub base_type: String,
    pub identified: bool,
    pub ilvl: Option<i32>,
    pub frame_type: i32,
    pub stack_size: Option<i32>,
}

impl From<SnapshotDB> for Snapshot {
    fn from(db: SnapshotDB) -> Self {
        Self {
            id: db.id,
            profile_id: db.profile_id,
            created_at: db.created_at,
            pricing_revision: db.pricing_revision,
        }
    }
}

// Counts and levels are far below i32::MAX; saturate rather than wrap.
fn to_db_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn from_db_int(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

fn from_db_small(value: i32) -> u8 {
    u8::try_from(value).unwrap_or_default()
}

impl NewSnapshotItemDB {
    /// Builds the row for `item`; the stash id comes from the attach call,
    /// not from the item.
    pub fn from_domain(snapshot_id: i64, stash_id: &str, item: Item) -> Self {
        Self {
            snapshot_id,
            stash_id: stash_id.to_string(),
            provider_id: item.provider_id,
            verified: item.verified,
            w: i32::from(item.w),
            h: i32::from(item.h),
            icon: item.icon,
            name: item.name,
            type_line: item.type_line,
            base_type: item.base_type,
            identified: item.identified,
            ilvl: item.ilvl.map(to_db_int),
            frame_type: i32::from(item.frame_type),
            stack_size: item.stack_size.map(to_db_int),
        }
    }
}

impl From<SnapshotItemDB> for Item {
    fn from(db: SnapshotItemDB) -> Self {
        Self {
            provider_id: db.provider_id,
            verified: db.verified,
            w: from_db_small(db.w),
            h: from_db_small(db.h),
            icon: db.icon,
            name: db.name,
            type_line: db.type_line,
            base_type: db.base_type,
            identified: db.identified,
            ilvl: db.ilvl.map(from_db_int),
            frame_type: from_db_small(db.frame_type),
            stack_size: db.stack_size.map(from_db_int),
            stash_id: db.stash_id,
        }
    }
}
