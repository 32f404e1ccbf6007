//! Google Ads HTTP request methods

use reqwest::RequestBuilder;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{AdsErrorMapper, ErrorContext, RawApiError};
use crate::types::{AdsCredential, AdsRow, ListAccessibleCustomersResponse, SearchResponse};
use crate::utils::log_sanitizer::truncate_for_log;

use super::types::{GoogleErrorEnvelope, SearchRequest};
use super::{GoogleAdsClient, SERVICE};

impl GoogleAdsClient {
    /// Adds the headers every Ads API call needs.
    fn authorized(
        &self,
        request: RequestBuilder,
        access_token: &str,
        login_customer_id: Option<&str>,
    ) -> RequestBuilder {
        let request = request
            .bearer_auth(access_token)
            .header("developer-token", &self.config.developer_token);
        match login_customer_id {
            Some(id) => request.header("login-customer-id", id),
            None => request,
        }
    }

    /// Sends the request and maps a non-2xx reply through the error mapper.
    async fn execute(
        &self,
        request: RequestBuilder,
        method: &str,
        action: &str,
        context: ErrorContext,
    ) -> Result<String> {
        let (status, text) = HttpUtils::execute_request_with_retry(
            request,
            SERVICE,
            method,
            action,
            self.config.max_retries,
        )
        .await?;

        if (200..300).contains(&status) {
            return Ok(text);
        }

        let err = self.map_error(raw_error_from_body(status, &text), context);
        if err.is_expected() {
            log::warn!("[{SERVICE}] {action} failed: {err}");
        } else {
            log::error!("[{SERVICE}] {action} failed: {err}");
        }
        Err(err)
    }

    /// `GET customers:listAccessibleCustomers`
    pub(crate) async fn get_accessible_customers(
        &self,
        credential: &AdsCredential,
    ) -> Result<ListAccessibleCustomersResponse> {
        let access_token = self.access_token(credential).await?;
        let url = format!(
            "{}/customers:listAccessibleCustomers",
            self.config.versioned_base()
        );
        let request = self.authorized(self.client.get(&url), &access_token, None);
        let text = self
            .execute(
                request,
                "GET",
                "listAccessibleCustomers",
                ErrorContext::default(),
            )
            .await?;
        HttpUtils::parse_json(&text, SERVICE)
    }

    /// `POST customers/{id}/googleAds:search`, following `nextPageToken` to the end.
    pub(crate) async fn search_all(
        &self,
        credential: &AdsCredential,
        customer_id: &str,
        query: &str,
    ) -> Result<Vec<AdsRow>> {
        let access_token = self.access_token(credential).await?;
        let url = format!(
            "{}/customers/{customer_id}/googleAds:search",
            self.config.versioned_base()
        );
        let action = format!("search customer {customer_id}");

        let mut rows = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let body = SearchRequest {
                query,
                page_token: page_token.as_deref(),
            };
            let request = self.authorized(
                self.client.post(&url).json(&body),
                &access_token,
                Some(customer_id),
            );
            let text = self
                .execute(
                    request,
                    "POST",
                    &action,
                    ErrorContext::for_customer(customer_id),
                )
                .await?;
            let page: SearchResponse = HttpUtils::parse_json(&text, SERVICE)?;
            rows.extend(page.results);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) if page_token.as_deref() == Some(next.as_str()) => {
                    log::warn!("[{SERVICE}] {action}: repeated page token, stopping");
                    break;
                }
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        log::debug!("[{SERVICE}] {action}: {} rows", rows.len());
        Ok(rows)
    }
}

/// Builds a [`RawApiError`] from a non-2xx body, JSON envelope or not.
pub(crate) fn raw_error_from_body(http_status: u16, body: &str) -> RawApiError {
    let Ok(envelope) = serde_json::from_str::<GoogleErrorEnvelope>(body) else {
        let message = if body.trim().is_empty() {
            format!("HTTP {http_status}")
        } else {
            truncate_for_log(body)
        };
        return RawApiError::new(message).with_http_status(http_status);
    };

    let error = envelope.error;
    let ads_error = error
        .first_ads_error()
        .map(|(kind, code, msg)| (kind, code, msg.to_string()));

    let message = match &ads_error {
        Some((_, _, msg)) if !msg.is_empty() => msg.clone(),
        _ => error.message.clone(),
    };

    let mut raw = RawApiError::new(message).with_http_status(http_status);
    if let Some(status) = error.status {
        raw = raw.with_status(status);
    }
    if let Some((kind, code, _)) = ads_error {
        raw = raw.with_ads_error(kind, code);
    }
    raw
}
