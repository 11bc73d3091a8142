//! Profile domain models.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A user-defined set of tracked stash tabs in one league.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub league: String,
    /// Tracked stash tab ids, in the order they are captured
    pub stash_ids: Vec<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub name: String,
    pub league: String,
    pub stash_ids: Vec<String>,
}

impl NewProfile {
    /// Validates the new profile data.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, &self.league, &self.stash_ids)
    }
}

/// Input model for editing an existing profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub id: i64,
    pub name: String,
    pub league: String,
    pub stash_ids: Vec<String>,
}

impl ProfileUpdate {
    /// Validates the profile update data.
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, &self.league, &self.stash_ids)
    }
}

fn validate_fields(name: &str, league: &str, stash_ids: &[String]) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "name".to_string(),
        )));
    }
    if league.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "league".to_string(),
        )));
    }
    if stash_ids.is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "A profile must track at least one stash tab".to_string(),
        )));
    }
    let mut seen = HashSet::new();
    for stash_id in stash_ids {
        if stash_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Stash ids cannot be blank".to_string(),
            )));
        }
        if !seen.insert(stash_id.as_str()) {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Stash '{}' is listed more than once",
                stash_id
            ))));
        }
    }
    Ok(())
}
