//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use ads_navigator_provider::AdsApiError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The session has no Ads credential bound yet
    #[error("Google Ads account not connected")]
    AuthMissing,

    /// A listing query against one account failed
    #[error("Failed to fetch campaigns: {}", .source.detail())]
    UpstreamQuery {
        account_id: String,
        source: AdsApiError,
    },

    /// Breadcrumb index outside the current trail
    #[error("Breadcrumb index {index} out of range (trail has {len} frames)")]
    BreadcrumbOutOfRange { index: usize, len: usize },

    /// Drill-down requested for a row that is not a client account of the current listing
    #[error("Row '{0}' is not a drillable client account")]
    NotDrillable(String),

    /// Unknown session id
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] AdsApiError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, missing access, ...), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::AuthMissing
            | Self::BreadcrumbOutOfRange { .. }
            | Self::NotDrillable(_)
            | Self::SessionNotFound(_) => true,
            Self::UpstreamQuery { source, .. } => source.is_expected(),
            Self::Provider(e) => e.is_expected(),
        }
    }

    /// The upstream error behind this failure, if any.
    #[must_use]
    pub fn upstream(&self) -> Option<&AdsApiError> {
        match self {
            Self::UpstreamQuery { source, .. } | Self::Provider(source) => Some(source),
            _ => None,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn upstream_query_message_carries_detail() {
        let err = CoreError::UpstreamQuery {
            account_id: "42".into(),
            source: AdsApiError::PermissionDenied {
                customer_id: Some("42".into()),
                raw_message: Some("User doesn't have permission to access customer.".into()),
            },
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch campaigns: User doesn't have permission to access customer."
        );
        assert!(err.is_expected());
        assert!(matches!(
            err.upstream(),
            Some(AdsApiError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn network_failures_are_unexpected() {
        let err = CoreError::UpstreamQuery {
            account_id: "42".into(),
            source: AdsApiError::NetworkError {
                detail: "connection reset".into(),
            },
        };
        assert!(!err.is_expected());
        assert_eq!(err.to_string(), "Failed to fetch campaigns: connection reset");
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::BreadcrumbOutOfRange { index: 3, len: 2 })
            .unwrap();
        assert_eq!(json["code"], "BreadcrumbOutOfRange");
        assert_eq!(json["details"]["index"], 3);
        assert!(CoreError::AuthMissing.is_expected());
    }
}
