//! Business logic service layer

mod account_tree_service;
mod campaign_cache;
mod navigation_controller;
mod projection;

pub use account_tree_service::AccountTreeService;
pub use campaign_cache::CampaignCache;
pub use navigation_controller::{Completion, FetchTicket, NavigationController};
pub use projection::project;

use std::sync::Arc;

use ads_navigator_provider::{AdsApi, AdsCredential};

use crate::error::{CoreError, CoreResult};
use crate::traits::CredentialProvider;

/// Service context - holds all dependencies
///
/// The platform layer creates this context and injects the Ads API backend
/// and credential provider.
pub struct ServiceContext {
    /// Ads API backend
    pub ads_api: Arc<dyn AdsApi>,
    /// Session credential source
    pub credential_provider: Arc<dyn CredentialProvider>,
}

impl ServiceContext {
    /// Create a service context
    #[must_use]
    pub fn new(
        ads_api: Arc<dyn AdsApi>,
        credential_provider: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            ads_api,
            credential_provider,
        }
    }

    /// Credential bound to the session, or [`CoreError::AuthMissing`].
    pub async fn require_credential(&self, session_id: &str) -> CoreResult<AdsCredential> {
        self.credential_provider
            .ads_credential(session_id)
            .await?
            .ok_or(CoreError::AuthMissing)
    }
}
