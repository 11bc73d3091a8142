use std::time::Duration;

use crate::errors::StashApiError;

pub const DEFAULT_BASE_URL: &str = "https://api.pathofexile.com";
pub const DEFAULT_USER_AGENT: &str = "OAuth loothound/0.1.0 (contact: loothound@users.noreply.github.com)";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`crate::PoeStashClient`].
#[derive(Debug, Clone)]
pub struct StashApiConfig {
    pub base_url: String,
    pub access_token: String,
    /// Realm for console accounts ("xbox", "sony"); `None` means PC
    pub realm: Option<String>,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for StashApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: String::new(),
            realm: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl StashApiConfig {
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = token.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_realm(mut self, realm: Option<String>) -> Self {
        self.realm = realm.filter(|r| !r.trim().is_empty());
        self
    }

    /// Checks the settings required to issue requests.
    pub fn validate(&self) -> Result<(), StashApiError> {
        if self.base_url.trim().is_empty() {
            return Err(StashApiError::InvalidConfig("base URL is empty".to_string()));
        }
        if self.access_token.trim().is_empty() {
            return Err(StashApiError::InvalidConfig(
                "access token is required".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(StashApiError::InvalidConfig(
                "user agent is required".to_string(),
            ));
        }
        Ok(())
    }
}
