//! Google Ads error mapping

use crate::error::AdsApiError;
use crate::traits::{AdsErrorMapper, ErrorContext, RawApiError};

use super::GoogleAdsClient;

/// Google Ads error mapping.
///
/// `GoogleAdsFailure` error codes are checked first, then the canonical
/// status of the envelope, then the bare HTTP status.
/// Reference: <https://developers.google.com/google-ads/api/docs/best-practices/common-errors>
impl AdsErrorMapper for GoogleAdsClient {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> AdsApiError {
        map_google_error(raw, context)
    }
}

pub(crate) fn map_google_error(raw: RawApiError, context: ErrorContext) -> AdsApiError {
    if let Some(err) = map_ads_failure(&raw, &context) {
        return err;
    }

    match raw.status.as_deref() {
        Some("UNAUTHENTICATED") => {
            return AdsApiError::InvalidCredentials {
                raw_message: Some(raw.message),
            };
        }
        Some("PERMISSION_DENIED") => {
            return AdsApiError::PermissionDenied {
                customer_id: context.customer_id,
                raw_message: Some(raw.message),
            };
        }
        Some("NOT_FOUND") => {
            if let Some(customer_id) = context.customer_id {
                return AdsApiError::CustomerNotFound {
                    customer_id,
                    raw_message: Some(raw.message),
                };
            }
        }
        Some("RESOURCE_EXHAUSTED") => {
            return AdsApiError::RateLimited {
                retry_after: None,
                raw_message: Some(raw.message),
            };
        }
        Some("INVALID_ARGUMENT") => {
            return AdsApiError::InvalidQuery {
                detail: raw.message,
            };
        }
        Some("DEADLINE_EXCEEDED") => return AdsApiError::Timeout {
            detail: raw.message,
        },
        Some("UNAVAILABLE") => return AdsApiError::NetworkError {
            detail: raw.message,
        },
        _ => {}
    }

    match raw.http_status {
        Some(401) => AdsApiError::InvalidCredentials {
            raw_message: Some(raw.message),
        },
        Some(403) => AdsApiError::PermissionDenied {
            customer_id: context.customer_id,
            raw_message: Some(raw.message),
        },
        Some(404) if context.customer_id.is_some() => AdsApiError::CustomerNotFound {
            customer_id: context.customer_id.unwrap_or_default(),
            raw_message: Some(raw.message),
        },
        _ => AdsApiError::Unknown {
            raw_code: raw.ads_error_code.or(raw.status),
            raw_message: raw.message,
        },
    }
}

/// `GoogleAdsFailure` codes, keyed by `(errorCode kind, value)`.
fn map_ads_failure(raw: &RawApiError, context: &ErrorContext) -> Option<AdsApiError> {
    let kind = raw.ads_error_kind.as_deref()?;
    let code = raw.ads_error_code.as_deref()?;
    let raw_message = Some(raw.message.clone());

    let mapped = match (kind, code) {
        // Not disclosed to this login, or the manager link is missing
        ("authorizationError", "USER_PERMISSION_DENIED" | "ACTION_NOT_PERMITTED")
        | (
            "authorizationError",
            "DEVELOPER_TOKEN_NOT_APPROVED" | "DEVELOPER_TOKEN_PROHIBITED",
        ) => AdsApiError::PermissionDenied {
            customer_id: context.customer_id.clone(),
            raw_message,
        },

        // Cancelled, suspended or closed accounts
        ("authorizationError", "CUSTOMER_NOT_ENABLED")
        | ("requestError", "CUSTOMER_NOT_FOUND" | "INVALID_CUSTOMER_ID") => {
            AdsApiError::CustomerNotFound {
                customer_id: context
                    .customer_id
                    .clone()
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message,
            }
        }

        ("authenticationError", _) => AdsApiError::InvalidCredentials { raw_message },

        // Daily basic-access operation limit
        ("quotaError", "RESOURCE_EXHAUSTED") => AdsApiError::QuotaExceeded { raw_message },
        ("quotaError", "RESOURCE_TEMPORARILY_EXHAUSTED") => AdsApiError::RateLimited {
            retry_after: None,
            raw_message,
        },

        ("queryError", _) => AdsApiError::InvalidQuery {
            detail: format!("{code}: {}", raw.message),
        },

        _ => return None,
    };
    Some(mapped)
}

/// OAuth token endpoint error codes (RFC 6749 section 5.2).
pub(crate) fn map_oauth_error(error: &str, description: Option<String>) -> AdsApiError {
    let message = description.unwrap_or_else(|| error.to_string());
    match error {
        // Expired, revoked or malformed refresh token
        "invalid_grant" => AdsApiError::InvalidCredentials {
            raw_message: Some(message),
        },
        "invalid_client" | "unauthorized_client" => AdsApiError::Configuration {
            detail: format!("OAuth client rejected: {message}"),
        },
        _ => AdsApiError::Unknown {
            raw_code: Some(error.to_string()),
            raw_message: message,
        },
    }
}
