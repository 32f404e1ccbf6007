use serde::{Deserialize, Serialize};

/// Unified error type for all advertising API operations.
///
/// Variants carry the upstream message where one was available so callers can
/// surface it verbatim. All variants are serializable for structured error
/// reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// The built-in HTTP client retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum AdsApiError {
    /// A network-level error occurred (DNS resolution failure, connection refused, 5xx gateway).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The refresh token or access token was rejected.
    InvalidCredentials {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The credential is valid but may not read the requested customer.
    PermissionDenied {
        /// Customer the request was issued against, if known.
        customer_id: Option<String>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The customer does not exist or is no longer enabled.
    CustomerNotFound {
        /// Customer the request was issued against.
        customer_id: String,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The developer token's daily operation quota is exhausted.
    ///
    /// Unlike [`RateLimited`](Self::RateLimited), this is not a transient condition.
    QuotaExceeded {
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded (HTTP 429 or `RESOURCE_EXHAUSTED`).
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the API, if available.
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The search query was rejected by the query parser or validator.
    InvalidQuery {
        /// Description of what's wrong.
        detail: String,
    },

    /// Client configuration is incomplete (missing client id, secret or developer token).
    Configuration {
        /// Which setting is missing or invalid.
        detail: String,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// An unrecognized error from the API.
    Unknown {
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl AdsApiError {
    /// Whether this is expected behaviour (permissions, missing customers, ...), used for log levels.
    ///
    /// Returns `true` when `warn` is the right log level, `false` for `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::CustomerNotFound { .. }
                | Self::QuotaExceeded { .. }
                | Self::InvalidQuery { .. }
        )
    }

    /// Whether a retry of the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// The most specific human-readable detail available, without the variant prefix.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::NetworkError { detail }
            | Self::Timeout { detail }
            | Self::InvalidQuery { detail }
            | Self::Configuration { detail }
            | Self::ParseError { detail } => detail.clone(),
            Self::InvalidCredentials { raw_message }
            | Self::PermissionDenied { raw_message, .. }
            | Self::CustomerNotFound { raw_message, .. }
            | Self::QuotaExceeded { raw_message }
            | Self::RateLimited { raw_message, .. } => {
                raw_message.clone().unwrap_or_else(|| self.to_string())
            }
            Self::Unknown { raw_message, .. } => raw_message.clone(),
        }
    }
}

impl std::fmt::Display for AdsApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::InvalidCredentials { raw_message } => {
                if let Some(msg) = raw_message {
                    write!(f, "Invalid credentials: {msg}")
                } else {
                    write!(f, "Invalid credentials")
                }
            }
            Self::PermissionDenied {
                customer_id,
                raw_message,
            } => {
                match customer_id {
                    Some(id) => write!(f, "Permission denied for customer '{id}'")?,
                    None => write!(f, "Permission denied")?,
                }
                if let Some(msg) = raw_message {
                    write!(f, ": {msg}")?;
                }
                Ok(())
            }
            Self::CustomerNotFound {
                customer_id,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "Customer '{customer_id}' not found: {msg}")
                } else {
                    write!(f, "Customer '{customer_id}' not found")
                }
            }
            Self::QuotaExceeded { .. } => write!(f, "Quota exceeded"),
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "Rate limited")
                }
            }
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::InvalidQuery { detail } => write!(f, "Invalid query: {detail}"),
            Self::Configuration { detail } => write!(f, "Configuration error: {detail}"),
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::Unknown { raw_message, .. } => write!(f, "{raw_message}"),
        }
    }
}

impl std::error::Error for AdsApiError {}

/// Convenience type alias for `Result<T, AdsApiError>`.
pub type Result<T> = std::result::Result<T, AdsApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = AdsApiError::NetworkError {
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = AdsApiError::InvalidCredentials { raw_message: None };
        assert_eq!(e.to_string(), "Invalid credentials");
    }

    #[test]
    fn display_permission_denied_with_customer() {
        let e = AdsApiError::PermissionDenied {
            customer_id: Some("123".to_string()),
            raw_message: Some("User doesn't have permission".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "Permission denied for customer '123': User doesn't have permission"
        );
    }

    #[test]
    fn display_permission_denied_bare() {
        let e = AdsApiError::PermissionDenied {
            customer_id: None,
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Permission denied");
    }

    #[test]
    fn display_customer_not_found() {
        let e = AdsApiError::CustomerNotFound {
            customer_id: "42".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Customer '42' not found");
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = AdsApiError::RateLimited {
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "Rate limited (retry after 30s)");
    }

    #[test]
    fn detail_prefers_raw_message() {
        let e = AdsApiError::PermissionDenied {
            customer_id: Some("1".to_string()),
            raw_message: Some("The caller does not have permission".to_string()),
        };
        assert_eq!(e.detail(), "The caller does not have permission");
    }

    #[test]
    fn detail_falls_back_to_display() {
        let e = AdsApiError::QuotaExceeded { raw_message: None };
        assert_eq!(e.detail(), "Quota exceeded");
    }

    #[test]
    fn expected_and_retryable_are_disjoint() {
        let variants = vec![
            AdsApiError::NetworkError { detail: "d".into() },
            AdsApiError::InvalidCredentials { raw_message: None },
            AdsApiError::PermissionDenied {
                customer_id: None,
                raw_message: None,
            },
            AdsApiError::CustomerNotFound {
                customer_id: "1".into(),
                raw_message: None,
            },
            AdsApiError::QuotaExceeded { raw_message: None },
            AdsApiError::RateLimited {
                retry_after: None,
                raw_message: None,
            },
            AdsApiError::Timeout { detail: "t".into() },
            AdsApiError::InvalidQuery { detail: "q".into() },
            AdsApiError::Configuration { detail: "c".into() },
            AdsApiError::ParseError { detail: "p".into() },
            AdsApiError::Unknown {
                raw_code: None,
                raw_message: "u".into(),
            },
        ];

        for v in &variants {
            assert!(
                !(v.is_expected() && v.is_retryable()),
                "{v:?} is both expected and retryable"
            );
        }
    }

    #[test]
    fn serialize_is_tagged_by_code() {
        let e = AdsApiError::RateLimited {
            retry_after: Some(60),
            raw_message: Some("too many requests".to_string()),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"RateLimited\""));
        assert!(json.contains("\"retry_after\":60"));
    }
}
