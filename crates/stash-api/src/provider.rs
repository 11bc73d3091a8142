//! Stash provider trait definition.

use async_trait::async_trait;

use crate::errors::StashApiError;
use crate::models::{StashSummary, StashTab};

/// Source of raw stash tab payloads.
///
/// Implement this trait to plug in a different transport (or a fixture
/// source in tests). Core only ever talks to stashes through it.
#[async_trait]
pub trait StashProvider: Send + Sync {
    /// Identifier used in logs.
    fn id(&self) -> &'static str;

    /// Lists the stash tabs of a league, without their items.
    async fn list_stashes(&self, league: &str) -> Result<Vec<StashSummary>, StashApiError>;

    /// Fetches one stash tab with its items (or children for folder tabs).
    async fn fetch_stash(&self, league: &str, stash_id: &str) -> Result<StashTab, StashApiError>;

    /// Fetches several stash tabs in the given order.
    ///
    /// The default implementation requests them one at a time and fails on
    /// the first error, so a partial result is never returned.
    async fn fetch_stashes(
        &self,
        league: &str,
        stash_ids: &[String],
    ) -> Result<Vec<StashTab>, StashApiError> {
        let mut tabs = Vec::with_capacity(stash_ids.len());
        for stash_id in stash_ids {
            tabs.push(self.fetch_stash(league, stash_id).await?);
        }
        Ok(tabs)
    }
}
