//! Profile repository and service traits.
//!
//! These traits define the contract for profile operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::profiles_model::{NewProfile, Profile, ProfileUpdate};
use crate::errors::Result;

/// Trait defining the contract for Profile repository operations.
#[async_trait]
pub trait ProfileRepositoryTrait: Send + Sync {
    /// Creates a new profile and returns it with its assigned id.
    async fn create(&self, new_profile: NewProfile) -> Result<Profile>;

    /// Updates an existing profile.
    async fn update(&self, profile_update: ProfileUpdate) -> Result<Profile>;

    /// Deletes a profile along with its snapshots.
    ///
    /// Returns the number of deleted profiles.
    async fn delete(&self, profile_id: i64) -> Result<usize>;

    /// Retrieves a profile by its ID.
    async fn get_by_id(&self, profile_id: i64) -> Result<Profile>;

    /// Lists all profiles ordered by name.
    async fn list(&self) -> Result<Vec<Profile>>;
}

/// Trait defining the contract for Profile service operations.
#[async_trait]
pub trait ProfileServiceTrait: Send + Sync {
    async fn create_profile(&self, new_profile: NewProfile) -> Result<Profile>;

    async fn update_profile(&self, profile_update: ProfileUpdate) -> Result<Profile>;

    async fn delete_profile(&self, profile_id: i64) -> Result<()>;

    async fn get_profile(&self, profile_id: i64) -> Result<Profile>;

    async fn list_profiles(&self) -> Result<Vec<Profile>>;
}
