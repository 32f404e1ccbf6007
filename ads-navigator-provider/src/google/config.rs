//! Google Ads client configuration

use serde::{Deserialize, Serialize};

use crate::error::{AdsApiError, Result};
use crate::utils::log_sanitizer::redact_secret;

pub(crate) const DEFAULT_API_BASE: &str = "https://googleads.googleapis.com";
pub(crate) const DEFAULT_API_VERSION: &str = "v17";
pub(crate) const DEFAULT_OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 3;

/// OAuth client and developer-token settings shared by every session.
///
/// Per-session refresh tokens are not part of this; they arrive with each call
/// as an [`AdsCredential`](crate::AdsCredential).
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleAdsConfig {
    pub client_id: String,
    pub client_secret: String,
    pub developer_token: String,
    pub api_version: String,
    pub api_base: String,
    pub oauth_token_url: String,
    /// Retries for transient failures; 0 sends every request once.
    pub max_retries: u32,
}

impl Default for GoogleAdsConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            developer_token: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            oauth_token_url: DEFAULT_OAUTH_TOKEN_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl std::fmt::Debug for GoogleAdsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAdsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &redact_secret(&self.client_secret))
            .field("developer_token", &redact_secret(&self.developer_token))
            .field("api_version", &self.api_version)
            .field("api_base", &self.api_base)
            .field("oauth_token_url", &self.oauth_token_url)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl GoogleAdsConfig {
    /// Checks that every required setting is present.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("developer_token", &self.developer_token),
            ("api_version", &self.api_version),
            ("api_base", &self.api_base),
            ("oauth_token_url", &self.oauth_token_url),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AdsApiError::Configuration {
                    detail: format!("google_ads.{name} is not set"),
                });
            }
        }
        Ok(())
    }

    /// `{api_base}/{api_version}`, without a trailing slash.
    pub(crate) fn versioned_base(&self) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }
}
