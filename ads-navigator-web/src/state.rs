//! Shared application state

use std::sync::Arc;

use actix_web::HttpRequest;
use ads_navigator_core::services::{AccountTreeService, CampaignCache};
use ads_navigator_core::{CoreError, InMemoryCredentialProvider, ServiceContext};
use ads_navigator_provider::{AdsApi, AdsCredential};

use crate::config::{AppConfig, DevSession};
use crate::error::ApiError;
use crate::session::{Session, SessionStore};

pub struct AppState {
    pub ctx: Arc<ServiceContext>,
    pub accounts: Arc<AccountTreeService>,
    pub campaigns: CampaignCache,
    pub sessions: SessionStore,
    cookie_name: String,
    production: bool,
}

impl AppState {
    pub fn new(ads_api: Arc<dyn AdsApi>, config: &AppConfig) -> Self {
        let ctx = Arc::new(ServiceContext::new(
            ads_api,
            Arc::new(InMemoryCredentialProvider::new()),
        ));
        let accounts = Arc::new(AccountTreeService::new(Arc::clone(&ctx)));
        Self {
            campaigns: CampaignCache::new(Arc::clone(&accounts)),
            accounts,
            ctx,
            sessions: SessionStore::new(),
            cookie_name: config.session.cookie_name.clone(),
            production: config.server.production,
        }
    }

    /// Creates the configured sessions and binds their credentials.
    pub async fn seed_sessions(&self, seeds: &[DevSession]) -> Result<(), CoreError> {
        for seed in seeds {
            let session = self
                .open_session(Some(seed.id.clone()), seed.refresh_token.clone())
                .await?;
            tracing::info!(
                session = session.id(),
                connected = seed.refresh_token.is_some(),
                "Seeded session"
            );
        }
        Ok(())
    }

    /// Starts a session with `refresh_token` as its credential. Reusing an id
    /// replaces that session along with its credential.
    pub async fn open_session(
        &self,
        id: Option<String>,
        refresh_token: Option<String>,
    ) -> Result<Arc<Session>, CoreError> {
        let session = self.sessions.create(id).await;
        let credentials = &self.ctx.credential_provider;
        match refresh_token {
            Some(token) => {
                credentials
                    .bind(session.id(), AdsCredential::new(token))
                    .await?;
            }
            None => credentials.revoke(session.id()).await?,
        }
        Ok(session)
    }

    /// Drops the session and forgets its credential.
    pub async fn end_session(&self, id: &str) -> Result<(), CoreError> {
        let session = self
            .sessions
            .remove(id)
            .await
            .ok_or_else(|| CoreError::SessionNotFound(id.to_string()))?;
        self.ctx.credential_provider.revoke(session.id()).await
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Session named by the request's cookie, if it exists.
    pub async fn session_for(&self, req: &HttpRequest) -> Option<Arc<Session>> {
        let cookie = req.cookie(&self.cookie_name)?;
        self.sessions.get(cookie.value()).await
    }

    /// Ads credential bound to `session`, or 401 when none is.
    pub async fn credential(&self, session: &Session) -> Result<AdsCredential, ApiError> {
        self.ctx
            .require_credential(session.id())
            .await
            .map_err(|e| self.api_error(&e))
    }

    pub fn api_error(&self, err: &CoreError) -> ApiError {
        ApiError::from_core(err, self.production)
    }
}
