//! Ads API factory.

use std::sync::Arc;

use crate::error::Result;
use crate::google::{GoogleAdsClient, GoogleAdsConfig};
use crate::traits::AdsApi;

/// Creates the Google Ads backend as a shareable [`AdsApi`].
///
/// Fails with [`AdsApiError::Configuration`](crate::AdsApiError::Configuration)
/// when a required setting is missing.
///
/// # Examples
///
/// ```rust,no_run
/// use ads_navigator_provider::{create_ads_api, GoogleAdsConfig};
///
/// let api = create_ads_api(GoogleAdsConfig {
///     client_id: "id.apps.googleusercontent.com".to_string(),
///     client_secret: "secret".to_string(),
///     developer_token: "token".to_string(),
///     ..GoogleAdsConfig::default()
/// }).unwrap();
/// ```
pub fn create_ads_api(config: GoogleAdsConfig) -> Result<Arc<dyn AdsApi>> {
    Ok(Arc::new(GoogleAdsClient::new(config)?))
}
