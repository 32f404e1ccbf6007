//! Credential provider abstract Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use ads_navigator_provider::AdsCredential;

use crate::error::CoreResult;

/// Credential provider Trait
///
/// Supplies the Ads credential bound to a session. The engine treats the
/// credential as opaque and never stores it itself.
/// Provides a default memory implementation, `InMemoryCredentialProvider`.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Credential bound to the session
    ///
    /// # Returns
    /// * `Ok(Some(credential))` - a credential is bound
    /// * `Ok(None)` - the session has not connected an Ads account yet
    async fn ads_credential(&self, session_id: &str) -> CoreResult<Option<AdsCredential>>;

    /// Bind a credential to the session, replacing any previous one
    async fn bind(&self, session_id: &str, credential: AdsCredential) -> CoreResult<()>;

    /// Forget the session's credential
    async fn revoke(&self, session_id: &str) -> CoreResult<()>;
}

/// In-memory credential provider
///
/// Credentials live as long as the process, like the session they belong to.
#[derive(Clone, Default)]
pub struct InMemoryCredentialProvider {
    credentials: Arc<RwLock<HashMap<String, AdsCredential>>>,
}

impl InMemoryCredentialProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialProvider for InMemoryCredentialProvider {
    async fn ads_credential(&self, session_id: &str) -> CoreResult<Option<AdsCredential>> {
        Ok(self.credentials.read().await.get(session_id).cloned())
    }

    async fn bind(&self, session_id: &str, credential: AdsCredential) -> CoreResult<()> {
        log::debug!("Binding credential {} to session", credential.fingerprint());
        self.credentials
            .write()
            .await
            .insert(session_id.to_string(), credential);
        Ok(())
    }

    async fn revoke(&self, session_id: &str) -> CoreResult<()> {
        self.credentials.write().await.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_lookup_revoke() {
        let provider = InMemoryCredentialProvider::new();
        assert!(provider.ads_credential("s1").await.unwrap().is_none());

        provider
            .bind("s1", AdsCredential::new("1//refresh"))
            .await
            .unwrap();
        let cred = provider.ads_credential("s1").await.unwrap().unwrap();
        assert_eq!(cred.expose_secret(), "1//refresh");
        assert!(provider.ads_credential("s2").await.unwrap().is_none());

        provider.revoke("s1").await.unwrap();
        assert!(provider.ads_credential("s1").await.unwrap().is_none());
    }
}
