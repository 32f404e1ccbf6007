//! Listing loader
//!
//! Turns the rows below one account into a fresh [`ListingState`]. Failures
//! are folded into a `Failed` listing so the screen can show them inline.

use std::sync::Arc;

use ads_navigator_provider::AdsCredential;

use crate::types::ListingState;

use super::AccountTreeService;

/// Loads listings for the navigator.
pub struct CampaignCache {
    resolver: Arc<AccountTreeService>,
}

impl CampaignCache {
    #[must_use]
    pub fn new(resolver: Arc<AccountTreeService>) -> Self {
        Self { resolver }
    }

    /// Fetches the rows of `account_id`.
    ///
    /// An empty id clears the listing without touching the API. The result
    /// always starts unfiltered on page 1.
    pub async fn load_for(&self, credential: &AdsCredential, account_id: &str) -> ListingState {
        if account_id.is_empty() {
            return ListingState::empty();
        }

        match self.resolver.list_child_rows(credential, account_id).await {
            Ok(rows) => {
                log::debug!("Loaded {} rows for account {account_id}", rows.len());
                ListingState::ready(account_id, rows)
            }
            Err(e) => ListingState::failed(account_id, e.to_string()),
        }
    }
}
