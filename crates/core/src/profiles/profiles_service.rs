use log::debug;
use std::sync::Arc;

use super::profiles_model::{NewProfile, Profile, ProfileUpdate};
use super::profiles_traits::{ProfileRepositoryTrait, ProfileServiceTrait};
use crate::errors::{DatabaseError, Result};
use crate::events::{DomainEvent, DomainEventSink, NoOpDomainEventSink};
use crate::query::{QueryKind, SharedQueryCache};

/// Service for managing profiles
pub struct ProfileService {
    repository: Arc<dyn ProfileRepositoryTrait>,
    query_cache: SharedQueryCache,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepositoryTrait>, query_cache: SharedQueryCache) -> Self {
        Self {
            repository,
            query_cache,
            event_sink: Arc::new(NoOpDomainEventSink),
        }
    }

    /// Sets the domain event sink for emitting ProfilesChanged events.
    pub fn with_event_sink(mut self, event_sink: Arc<dyn DomainEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    fn profiles_changed(&self, profile_id: i64) {
        self.query_cache.invalidate(QueryKind::Profiles, None);
        self.event_sink
            .emit(DomainEvent::profiles_changed(vec![profile_id]));
    }
}

#[async_trait::async_trait]
impl ProfileServiceTrait for ProfileService {
    async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile> {
        new_profile.validate()?;
        debug!(
            "Creating profile '{}' for league {} with {} stash tabs",
            new_profile.name,
            new_profile.league,
            new_profile.stash_ids.len()
        );
        let profile = self.repository.create(new_profile).await?;
        self.profiles_changed(profile.id);
        Ok(profile)
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<Profile> {
        update.validate()?;
        let profile = self.repository.update(update).await?;
        self.profiles_changed(profile.id);
        Ok(profile)
    }

    /// Deletes a profile; its snapshots go with it.
    async fn delete_profile(&self, profile_id: i64) -> Result<()> {
        let deleted = self.repository.delete(profile_id).await?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound(format!("Profile {}", profile_id)).into());
        }
        debug!("Deleted profile {}", profile_id);
        self.profiles_changed(profile_id);
        Ok(())
    }

    async fn get_profile(&self, profile_id: i64) -> Result<Profile> {
        self.repository.get_by_id(profile_id).await
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.repository.list().await
    }
}
