//! OAuth refresh-token exchange and access-token cache

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::error::{AdsApiError, Result};
use crate::http_client::HttpUtils;
use crate::types::AdsCredential;
use crate::utils::log_sanitizer::redact_secret;

use super::GoogleAdsClient;
use super::error::map_oauth_error;
use super::types::{TokenErrorResponse, TokenResponse};

/// Tokens are refreshed this long before Google says they expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Access tokens keyed by credential fingerprint.
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    entries: RwLock<HashMap<String, CachedToken>>,
}

impl TokenCache {
    pub async fn get(&self, fingerprint: &str, now: DateTime<Utc>) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(fingerprint)
            .filter(|t| now + Duration::seconds(EXPIRY_MARGIN_SECS) < t.expires_at)
            .map(|t| t.access_token.clone())
    }

    pub async fn insert(
        &self,
        fingerprint: String,
        access_token: String,
        expires_in_secs: i64,
        now: DateTime<Utc>,
    ) {
        let mut entries = self.entries.write().await;
        entries.insert(
            fingerprint,
            CachedToken {
                access_token,
                expires_at: now + Duration::seconds(expires_in_secs),
            },
        );
    }

    pub async fn invalidate(&self, fingerprint: &str) {
        self.entries.write().await.remove(fingerprint);
    }
}

impl GoogleAdsClient {
    /// Returns a cached access token for the credential, refreshing it if needed.
    pub(crate) async fn access_token(&self, credential: &AdsCredential) -> Result<String> {
        let fingerprint = credential.fingerprint();
        if let Some(token) = self.tokens.get(&fingerprint, Utc::now()).await {
            return Ok(token);
        }

        let token = self.exchange_refresh_token(credential).await?;
        log::debug!(
            "[oauth] refreshed access token {} for credential {fingerprint}, expires in {}s",
            redact_secret(&token.access_token),
            token.expires_in
        );
        self.tokens
            .insert(
                fingerprint,
                token.access_token.clone(),
                token.expires_in,
                Utc::now(),
            )
            .await;
        Ok(token.access_token)
    }

    /// Drops the cached access token after the API rejected it.
    pub(crate) async fn forget_access_token(&self, credential: &AdsCredential) {
        self.tokens.invalidate(&credential.fingerprint()).await;
    }

    async fn exchange_refresh_token(&self, credential: &AdsCredential) -> Result<TokenResponse> {
        let body = format!(
            "grant_type=refresh_token&refresh_token={}&client_id={}&client_secret={}",
            urlencoding::encode(credential.expose_secret()),
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.client_secret),
        );

        let request = self
            .client
            .post(&self.config.oauth_token_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body);

        let (status, text) = HttpUtils::execute_request_with_retry(
            request,
            "oauth",
            "POST",
            "token refresh",
            self.config.max_retries,
        )
        .await?;

        if (200..300).contains(&status) {
            return HttpUtils::parse_json(&text, "oauth");
        }

        match serde_json::from_str::<TokenErrorResponse>(&text) {
            Ok(err) => {
                let mapped = map_oauth_error(&err.error, err.error_description);
                if mapped.is_expected() {
                    log::warn!("[oauth] token refresh rejected: {mapped}");
                } else {
                    log::error!("[oauth] token refresh failed: {mapped}");
                }
                Err(mapped)
            }
            Err(_) => Err(AdsApiError::Unknown {
                raw_code: Some(status.to_string()),
                raw_message: format!("token endpoint returned HTTP {status}"),
            }),
        }
    }
}
