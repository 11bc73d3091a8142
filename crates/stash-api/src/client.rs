//! HTTP client for the Path of Exile stash API.
//!
//! Endpoints used:
//! - `GET /stash[/<realm>]/<league>` lists stash tabs
//! - `GET /stash[/<realm>]/<league>/<stash_id>` returns one tab with items
//!
//! Both require an OAuth bearer token with the `account:stashes` scope and a
//! descriptive `User-Agent`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::StashApiConfig;
use crate::errors::StashApiError;
use crate::models::{StashListResponse, StashResponse, StashSummary, StashTab};
use crate::provider::StashProvider;

const PROVIDER_ID: &str = "POE_API";

pub struct PoeStashClient {
    client: Client,
    config: StashApiConfig,
}

impl PoeStashClient {
    pub fn new(config: StashApiConfig) -> Result<Self, StashApiError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds `<base>/stash[/<realm>]/<league>[/<stash_id>]`.
    fn stash_url(&self, league: &str, stash_id: Option<&str>) -> String {
        let mut url = format!("{}/stash", self.config.base_url.trim_end_matches('/'));
        if let Some(realm) = &self.config.realm {
            url.push('/');
            url.push_str(&urlencoding::encode(realm));
        }
        url.push('/');
        url.push_str(&urlencoding::encode(league));
        if let Some(id) = stash_id {
            url.push('/');
            url.push_str(&urlencoding::encode(id));
        }
        url
    }

    async fn get(&self, url: &str, subject: &str) -> Result<Response, StashApiError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;
        check_status(response, subject).await
    }
}

async fn check_status(response: Response, subject: &str) -> Result<Response, StashApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(StashApiError::Unauthorized(format!("{} ({})", subject, status)))
        }
        StatusCode::NOT_FOUND => Err(StashApiError::NotFound(subject.to_string())),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after_secs = retry_after(response.headers());
            warn!(
                "Stash provider rate limited request for {} (retry after {:?}s)",
                subject, retry_after_secs
            );
            Err(StashApiError::RateLimited { retry_after_secs })
        }
        _ => {
            let message = response.text().await.unwrap_or_default();
            Err(StashApiError::Provider {
                status: Some(status.as_u16()),
                message,
            })
        }
    }
}

fn retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

#[async_trait]
impl StashProvider for PoeStashClient {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn list_stashes(&self, league: &str) -> Result<Vec<StashSummary>, StashApiError> {
        let url = self.stash_url(league, None);
        let body = self.get(&url, league).await?.text().await?;
        let parsed: StashListResponse = serde_json::from_str(&body)?;
        Ok(parsed.stashes.iter().map(StashSummary::from).collect())
    }

    async fn fetch_stash(&self, league: &str, stash_id: &str) -> Result<StashTab, StashApiError> {
        let url = self.stash_url(league, Some(stash_id));
        let body = self.get(&url, stash_id).await?.text().await?;
        let parsed: StashResponse = serde_json::from_str(&body)?;
        debug!(
            "Fetched stash {} ({}) with {} items",
            parsed.stash.id,
            parsed.stash.stash_type,
            parsed.stash.items.as_ref().map_or(0, Vec::len)
        );
        Ok(parsed.stash)
    }
}
