//! Google Ads REST backend

mod client;
mod config;
mod error;
mod http;
mod oauth;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::http_client::create_http_client;

pub use config::GoogleAdsConfig;

use oauth::TokenCache;

/// Log label for Ads API requests.
pub(crate) const SERVICE: &str = "google-ads";

/// Google Ads API client.
///
/// One instance serves every session; access tokens are cached per refresh
/// token fingerprint.
pub struct GoogleAdsClient {
    pub(crate) client: Client,
    pub(crate) config: GoogleAdsConfig,
    pub(crate) tokens: TokenCache,
}

impl GoogleAdsClient {
    /// Validates the configuration and builds the HTTP client.
    pub fn new(config: GoogleAdsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: create_http_client()?,
            config,
            tokens: TokenCache::default(),
        })
    }
}
