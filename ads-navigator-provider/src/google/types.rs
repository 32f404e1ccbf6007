//! Google API wire types (error envelopes, OAuth token responses)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Standard Google API error envelope: `{"error": {...}}`.
#[derive(Debug, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct GoogleErrorBody {
    #[serde(default)]
    #[allow(dead_code)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    /// Canonical status (`PERMISSION_DENIED`, `UNAUTHENTICATED`, ...).
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub details: Vec<GoogleErrorDetail>,
}

/// One `details[]` entry. Only `GoogleAdsFailure` details carry `errors`.
#[derive(Debug, Deserialize)]
pub struct GoogleErrorDetail {
    #[serde(default)]
    pub errors: Vec<GoogleAdsErrorEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAdsErrorEntry {
    /// Single-key object, e.g. `{"authorizationError": "USER_PERMISSION_DENIED"}`.
    #[serde(default)]
    pub error_code: Map<String, Value>,
    #[serde(default)]
    pub message: String,
}

impl GoogleErrorBody {
    /// First `(kind, code, message)` found in the `GoogleAdsFailure` details.
    pub fn first_ads_error(&self) -> Option<(String, String, &str)> {
        self.details
            .iter()
            .flat_map(|d| d.errors.iter())
            .find_map(|entry| {
                entry.error_code.iter().next().and_then(|(kind, code)| {
                    code.as_str()
                        .map(|c| (kind.clone(), c.to_string(), entry.message.as_str()))
                })
            })
    }
}

/// Successful response of the OAuth token endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    #[serde(default)]
    #[allow(dead_code)]
    pub token_type: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

/// Error response of the OAuth token endpoint (RFC 6749 section 5.2).
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Request body of `googleAds:search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ads_failure_code() {
        let json = r#"{
          "error": {
            "code": 403,
            "message": "The caller does not have permission",
            "status": "PERMISSION_DENIED",
            "details": [
              {
                "@type": "type.googleapis.com/google.ads.googleads.v17.errors.GoogleAdsFailure",
                "errors": [
                  {
                    "errorCode": {"authorizationError": "USER_PERMISSION_DENIED"},
                    "message": "User doesn't have permission to access customer."
                  }
                ],
                "requestId": "abc"
              }
            ]
          }
        }"#;
        let envelope: GoogleErrorEnvelope = serde_json::from_str(json).unwrap();
        let (kind, code, message) = envelope.error.first_ads_error().unwrap();
        assert_eq!(kind, "authorizationError");
        assert_eq!(code, "USER_PERMISSION_DENIED");
        assert!(message.starts_with("User doesn't have permission"));
        assert_eq!(envelope.error.status.as_deref(), Some("PERMISSION_DENIED"));
    }

    #[test]
    fn envelope_without_details() {
        let json = r#"{"error": {"code": 401, "message": "bad token", "status": "UNAUTHENTICATED"}}"#;
        let envelope: GoogleErrorEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.error.first_ads_error().is_none());
        assert_eq!(envelope.error.message, "bad token");
    }

    #[test]
    fn search_request_omits_empty_page_token() {
        let body = serde_json::to_string(&SearchRequest {
            query: "SELECT campaign.id FROM campaign",
            page_token: None,
        })
        .unwrap();
        assert_eq!(body, r#"{"query":"SELECT campaign.id FROM campaign"}"#);

        let body = serde_json::to_string(&SearchRequest {
            query: "q",
            page_token: Some("next"),
        })
        .unwrap();
        assert_eq!(body, r#"{"query":"q","pageToken":"next"}"#);
    }

    #[test]
    fn token_response_defaults_lifetime() {
        let t: TokenResponse = serde_json::from_str(r#"{"access_token": "ya29.x"}"#).unwrap();
        assert_eq!(t.expires_in, 3600);
    }
}
