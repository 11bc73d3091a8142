//! Database models for profiles.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use loothound_core::profiles::{NewProfile, Profile};

use crate::errors::StorageError;

/// Database model for profiles
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProfileDB {
    pub id: i64,
    pub name: String,
    pub league: String,
    /// JSON array of stash tab ids
    pub stash_ids: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for creating a new profile
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::profiles)]
pub struct NewProfileDB {
    pub name: String,
    pub league: String,
    pub stash_ids: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewProfileDB {
    pub fn from_domain(profile: NewProfile, now: NaiveDateTime) -> Result<Self, StorageError> {
        Ok(Self {
            name: profile.name.trim().to_string(),
            league: profile.league.trim().to_string(),
            stash_ids: encode_stash_ids(&profile.stash_ids)?,
            created_at: now,
            updated_at: now,
        })
    }
}

pub(crate) fn encode_stash_ids(stash_ids: &[String]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(stash_ids)?)
}

impl TryFrom<ProfileDB> for Profile {
    type Error = StorageError;

    fn try_from(db: ProfileDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            name: db.name,
            league: db.league,
            stash_ids: serde_json::from_str(&db.stash_ids)?,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
