use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AdsApiError, Result};
use crate::utils::int64;

// ============ Credential ============

/// Opaque advertising API credential (an OAuth refresh token) bound to a session.
///
/// The token is never printed: `Debug` is redacted and logs use
/// [`fingerprint`](Self::fingerprint) instead.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AdsCredential(String);

impl AdsCredential {
    pub fn new(refresh_token: impl Into<String>) -> Self {
        Self(refresh_token.into())
    }

    /// The raw refresh token, for the token exchange request only.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Short stable identifier safe to log and to use as a cache key.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..6])
    }
}

impl std::fmt::Debug for AdsCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdsCredential({})", self.fingerprint())
    }
}

// ============ Customer resources ============

/// A `customers/{id}` resource name as returned by `listAccessibleCustomers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerResource {
    /// Full resource name, e.g. `customers/1234567890`.
    pub resource_name: String,
    /// The bare customer id extracted from the resource name.
    pub customer_id: String,
}

impl CustomerResource {
    /// Parse a resource name of the form `customers/{id}`.
    pub fn parse(resource_name: &str) -> Result<Self> {
        let customer_id = customer_id_from_resource(resource_name).ok_or_else(|| {
            AdsApiError::ParseError {
                detail: format!("unexpected customer resource name: {resource_name}"),
            }
        })?;
        Ok(Self {
            resource_name: resource_name.to_string(),
            customer_id,
        })
    }
}

/// Extract the id segment from `customers/{id}` (or `customers/{id}/...`).
pub fn customer_id_from_resource(resource_name: &str) -> Option<String> {
    let mut parts = resource_name.split('/');
    match (parts.next(), parts.next()) {
        (Some("customers"), Some(id)) if !id.is_empty() => Some(id.to_string()),
        _ => None,
    }
}

/// Strip the dashes from a display-formatted customer id (`123-456-7890`).
pub fn normalize_customer_id(customer_id: &str) -> String {
    customer_id.chars().filter(|c| *c != '-').collect()
}

// ============ Search rows ============

/// One row of a search response.
///
/// Only the resources selected by the query are present; everything else is
/// `None`. Field names follow the REST JSON encoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdsRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerFields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_client: Option<CustomerClientFields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<CampaignFields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsFields>,
}

/// `customer.*` fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    #[serde(default, with = "int64::option")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptive_name: Option<String>,
    /// Proto3 JSON omits `false`, so absence means "not a manager".
    #[serde(default)]
    pub manager: bool,
}

/// `customer_client.*` fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerClientFields {
    /// Resource name of the client customer, `customers/{id}`.
    #[serde(default)]
    pub client_customer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptive_name: Option<String>,
    #[serde(default)]
    pub manager: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `campaign.*` fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignFields {
    #[serde(default, with = "int64::option")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
}

/// `metrics.*` fields. Zero-valued counters are omitted on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsFields {
    #[serde(default, with = "int64::required")]
    pub clicks: i64,
    #[serde(default, with = "int64::required")]
    pub impressions: i64,
}

/// Response body of `customers:listAccessibleCustomers`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListAccessibleCustomersResponse {
    #[serde(default)]
    pub resource_names: Vec<String>,
}

/// Response body of `googleAds:search`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<AdsRow>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn credential_debug_is_redacted() {
        let cred = AdsCredential::new("1//super-secret-refresh-token");
        let debug = format!("{cred:?}");
        assert!(!debug.contains("super-secret"));
        assert_eq!(debug, format!("AdsCredential({})", cred.fingerprint()));
        assert_eq!(cred.fingerprint().len(), 12);
    }

    #[test]
    fn parse_customer_resource() {
        let res = CustomerResource::parse("customers/1234567890").unwrap();
        assert_eq!(res.customer_id, "1234567890");
        assert_eq!(res.resource_name, "customers/1234567890");
    }

    #[test]
    fn parse_customer_resource_rejects_garbage() {
        assert!(CustomerResource::parse("campaigns/1").is_err());
        assert!(CustomerResource::parse("customers/").is_err());
        assert!(CustomerResource::parse("").is_err());
    }

    #[test]
    fn nested_resource_yields_customer_id() {
        assert_eq!(
            customer_id_from_resource("customers/111/customerClients/222").as_deref(),
            Some("111")
        );
    }

    #[test]
    fn normalize_strips_dashes() {
        assert_eq!(normalize_customer_id("123-456-7890"), "1234567890");
        assert_eq!(normalize_customer_id("1234567890"), "1234567890");
    }

    #[test]
    fn customer_row_from_rest_json() {
        let json = r#"{
            "customer": {
                "resourceName": "customers/111",
                "id": "111",
                "descriptiveName": "Acme MCC",
                "manager": true
            }
        }"#;
        let row: AdsRow = serde_json::from_str(json).unwrap();
        let customer = row.customer.unwrap();
        assert_eq!(customer.id, Some(111));
        assert_eq!(customer.descriptive_name.as_deref(), Some("Acme MCC"));
        assert!(customer.manager);
        assert!(row.campaign.is_none());
    }

    #[test]
    fn omitted_manager_flag_means_false() {
        let row: AdsRow =
            serde_json::from_str(r#"{"customer": {"id": "5", "descriptiveName": "Leaf"}}"#)
                .unwrap();
        assert!(!row.customer.unwrap().manager);
    }

    #[test]
    fn campaign_row_with_partial_metrics() {
        let json = r#"{
            "campaign": {"id": "9", "name": "Brand - Search", "status": "ENABLED"},
            "metrics": {"impressions": "1200"}
        }"#;
        let row: AdsRow = serde_json::from_str(json).unwrap();
        let metrics = row.metrics.unwrap();
        assert_eq!(metrics.clicks, 0);
        assert_eq!(metrics.impressions, 1200);
        assert_eq!(row.campaign.unwrap().name, "Brand - Search");
    }

    #[test]
    fn search_response_page_token() {
        let json = r#"{"results": [{"campaign": {"id": "1", "name": "A"}}], "nextPageToken": "abc"}"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 1);
        assert_eq!(resp.next_page_token.as_deref(), Some("abc"));
    }
}
