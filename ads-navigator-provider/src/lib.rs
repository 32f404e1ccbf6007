//! # ads-navigator-provider
//!
//! Advertising API abstraction for Ads Navigator. The engine talks to an
//! [`AdsApi`]; this crate ships the Google Ads REST implementation.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`rustls`** *(default)*: Use rustls.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ads_navigator_provider::{create_ads_api, queries, AdsCredential, GoogleAdsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = create_ads_api(GoogleAdsConfig {
//!         client_id: "id.apps.googleusercontent.com".to_string(),
//!         client_secret: "secret".to_string(),
//!         developer_token: "dev-token".to_string(),
//!         ..GoogleAdsConfig::default()
//!     })?;
//!
//!     let credential = AdsCredential::new("1//refresh-token");
//!     for customer in api.list_accessible_customers(&credential).await? {
//!         let rows = api
//!             .query_customer(&credential, &customer.customer_id, queries::CUSTOMER_DETAILS)
//!             .await?;
//!         println!("{} -> {} rows", customer.customer_id, rows.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Result<T, AdsApiError>`](AdsApiError):
//!
//! - [`AdsApiError::InvalidCredentials`]: refresh or access token rejected
//! - [`AdsApiError::PermissionDenied`]: customer not readable by this login
//! - [`AdsApiError::CustomerNotFound`]: customer missing or disabled
//! - [`AdsApiError::RateLimited`]: rate limit exceeded (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried
//! with exponential backoff before they reach the caller.

mod error;
mod factory;
mod google;
mod http_client;
mod traits;
mod types;

pub mod queries;

/// Utility modules.
pub mod utils;

pub use error::{AdsApiError, Result};

pub use factory::create_ads_api;

// Internal mapping traits are not exported
pub use traits::AdsApi;

pub use types::{
    AdsCredential, AdsRow, CampaignFields, CustomerClientFields, CustomerFields, CustomerResource,
    MetricsFields, customer_id_from_resource, normalize_customer_id,
};

pub use google::{GoogleAdsClient, GoogleAdsConfig};
