//! `AdsApi` implementation for Google Ads

use async_trait::async_trait;

use crate::error::{AdsApiError, Result};
use crate::traits::AdsApi;
use crate::types::{AdsCredential, AdsRow, CustomerResource, normalize_customer_id};

use super::GoogleAdsClient;

#[async_trait]
impl AdsApi for GoogleAdsClient {
    fn id(&self) -> &'static str {
        "google-ads"
    }

    async fn list_accessible_customers(
        &self,
        credential: &AdsCredential,
    ) -> Result<Vec<CustomerResource>> {
        let response = match self.get_accessible_customers(credential).await {
            Ok(response) => response,
            Err(e) => return Err(self.on_error(credential, e).await),
        };

        let mut customers = Vec::with_capacity(response.resource_names.len());
        for name in &response.resource_names {
            match CustomerResource::parse(name) {
                Ok(resource) => customers.push(resource),
                Err(e) => log::warn!("[{}] skipping resource: {e}", self.id()),
            }
        }
        Ok(customers)
    }

    async fn query_customer(
        &self,
        credential: &AdsCredential,
        customer_id: &str,
        query: &str,
    ) -> Result<Vec<AdsRow>> {
        let customer_id = normalize_customer_id(customer_id);
        if customer_id.is_empty() || !customer_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(AdsApiError::CustomerNotFound {
                customer_id,
                raw_message: Some("customer id must be numeric".to_string()),
            });
        }

        match self.search_all(credential, &customer_id, query).await {
            Ok(rows) => Ok(rows),
            Err(e) => Err(self.on_error(credential, e).await),
        }
    }
}

impl GoogleAdsClient {
    /// A rejected access token is dropped so the next call refreshes it.
    async fn on_error(&self, credential: &AdsCredential, error: AdsApiError) -> AdsApiError {
        if matches!(error, AdsApiError::InvalidCredentials { .. }) {
            self.forget_access_token(credential).await;
        }
        error
    }
}
