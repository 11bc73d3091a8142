use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use loothound_core::profiles::{NewProfile, Profile, ProfileRepositoryTrait, ProfileUpdate};
use loothound_core::Result;

use super::model::{encode_stash_ids, NewProfileDB, ProfileDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::profiles;
use crate::schema::profiles::dsl::*;

pub struct ProfileRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ProfileRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ProfileRepository { pool, writer }
    }

    fn get_by_id_impl(&self, profile_id: i64) -> Result<Profile> {
        let mut conn = get_connection(&self.pool)?;
        let profile_db = profiles
            .find(profile_id)
            .select(ProfileDB::as_select())
            .first::<ProfileDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Profile::try_from(profile_db)?)
    }

    fn list_impl(&self) -> Result<Vec<Profile>> {
        let mut conn = get_connection(&self.pool)?;
        let profiles_db = profiles
            .select(ProfileDB::as_select())
            .order((name.asc(), id.asc()))
            .load::<ProfileDB>(&mut conn)
            .map_err(StorageError::from)?;
        profiles_db
            .into_iter()
            .map(|p| Profile::try_from(p).map_err(loothound_core::Error::from))
            .collect()
    }
}

#[async_trait]
impl ProfileRepositoryTrait for ProfileRepository {
    async fn create(&self, new_profile: NewProfile) -> Result<Profile> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Profile> {
                let new_profile_db =
                    NewProfileDB::from_domain(new_profile, Utc::now().naive_utc())?;
                let result_db = diesel::insert_into(profiles::table)
                    .values(&new_profile_db)
                    .returning(ProfileDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Profile::try_from(result_db)?)
            })
            .await
    }

    async fn update(&self, profile_update: ProfileUpdate) -> Result<Profile> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Profile> {
                let encoded = encode_stash_ids(&profile_update.stash_ids)?;
                let result_db = diesel::update(profiles.find(profile_update.id))
                    .set((
                        name.eq(profile_update.name.trim()),
                        league.eq(profile_update.league.trim()),
                        stash_ids.eq(encoded),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(ProfileDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Profile::try_from(result_db)?)
            })
            .await
    }

    async fn delete(&self, profile_id: i64) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(profiles.find(profile_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    async fn get_by_id(&self, profile_id: i64) -> Result<Profile> {
        self.get_by_id_impl(profile_id)
    }

    async fn list(&self) -> Result<Vec<Profile>> {
        self.list_impl()
    }
}
