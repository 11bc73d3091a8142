use serde::Deserialize;

use loothound_core::profiles::{NewProfile, ProfileUpdate};

/// Request body for creating or editing a profile.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub name: String,
    pub league: String,
    #[serde(default)]
    pub stash_ids: Vec<String>,
}

impl From<ProfileInput> for NewProfile {
    fn from(input: ProfileInput) -> Self {
        Self {
            name: input.name,
            league: input.league,
            stash_ids: input.stash_ids,
        }
    }
}

impl ProfileInput {
    pub fn into_update(self, id: i64) -> ProfileUpdate {
        ProfileUpdate {
            id,
            name: self.name,
            league: self.league,
            stash_ids: self.stash_ids,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct StashQuery {
    pub league: Option<String>,
}
