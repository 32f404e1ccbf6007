//! Shared helpers for the live Google Ads tests

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use ads_navigator_provider::{AdsApi, AdsCredential, GoogleAdsConfig, create_ads_api};

/// Skip the test when any of the environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: {} is not set", $var);
                return;
            }
        )+
    };
}

/// Assert that a `Result` is `Ok` and unwrap it (otherwise fail the test).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Live API handle plus the credential under test.
pub struct TestContext {
    pub api: Arc<dyn AdsApi>,
    pub credential: AdsCredential,
}

impl TestContext {
    pub fn google_ads() -> Option<Self> {
        let config = GoogleAdsConfig {
            client_id: env::var("GOOGLE_CLIENT_ID").ok()?,
            client_secret: env::var("GOOGLE_CLIENT_SECRET").ok()?,
            developer_token: env::var("GOOGLE_ADS_DEVELOPER_TOKEN").ok()?,
            ..GoogleAdsConfig::default()
        };
        let credential = AdsCredential::new(env::var("GOOGLE_ADS_REFRESH_TOKEN").ok()?);
        let api = create_ads_api(config).ok()?;
        Some(Self { api, credential })
    }
}
