use async_trait::async_trait;

use crate::error::{AdsApiError, Result};
use crate::types::{AdsCredential, AdsRow, CustomerResource};

/// Raw API error before mapping (internal use)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP status code of the failed response, when there was one.
    pub http_status: Option<u16>,
    /// `error.status` from the Google error envelope (e.g. `PERMISSION_DENIED`).
    pub status: Option<String>,
    /// Key of the first `errorCode` object in a `GoogleAdsFailure` detail
    /// (e.g. `authorizationError`).
    pub ads_error_kind: Option<String>,
    /// Value of that `errorCode` entry (e.g. `USER_PERMISSION_DENIED`).
    pub ads_error_code: Option<String>,
    /// Original error message.
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            http_status: None,
            status: None,
            ads_error_kind: None,
            ads_error_code: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_http_status(mut self, http_status: u16) -> Self {
        self.http_status = Some(http_status);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_ads_error(mut self, kind: impl Into<String>, code: impl Into<String>) -> Self {
        self.ads_error_kind = Some(kind.into());
        self.ads_error_code = Some(code.into());
        self
    }
}

/// Extra information available when mapping an error (internal use)
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Customer the failing request targeted.
    pub customer_id: Option<String>,
}

impl ErrorContext {
    pub fn for_customer(customer_id: &str) -> Self {
        Self {
            customer_id: Some(customer_id.to_string()),
        }
    }
}

/// Maps raw API failures to [`AdsApiError`] (internal use)
pub(crate) trait AdsErrorMapper {
    /// Maps the raw error to the unified error type.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> AdsApiError;
}

/// Advertising API collaborator.
///
/// Implementations own authentication, network timeouts and retries; callers
/// see one call per logical operation.
#[async_trait]
pub trait AdsApi: Send + Sync {
    /// Backend identifier, used in log lines.
    fn id(&self) -> &'static str;

    /// Lists every customer resource directly accessible by the credential.
    async fn list_accessible_customers(
        &self,
        credential: &AdsCredential,
    ) -> Result<Vec<CustomerResource>>;

    /// Runs a query against one customer and returns every result row.
    ///
    /// Paged responses are followed to the end.
    async fn query_customer(
        &self,
        credential: &AdsCredential,
        customer_id: &str,
        query: &str,
    ) -> Result<Vec<AdsRow>>;
}
