//! HTTP error responses
//!
//! Every failure leaves the service as `{ "message": ... }` with a status
//! derived from the core error.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use ads_navigator_core::CoreError;
use ads_navigator_core::error::AdsApiError;
use serde_json::json;

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// No known session.
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: UNAUTHORIZED_MESSAGE.to_string(),
        }
    }

    /// Maps a core error, logging it at the level its kind calls for.
    ///
    /// In production mode the text of 500 responses is replaced.
    pub fn from_core(err: &CoreError, production: bool) -> Self {
        let status = status_for(err);
        if err.is_expected() {
            tracing::warn!(status = status.as_u16(), "{err}");
        } else {
            tracing::error!(status = status.as_u16(), "{err}");
        }

        let message = if production && status == StatusCode::INTERNAL_SERVER_ERROR {
            INTERNAL_MESSAGE.to_string()
        } else {
            err.to_string()
        };
        Self { status, message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(json!({ "message": self.message }))
    }
}

/// Status code for a core error.
pub fn status_for(err: &CoreError) -> StatusCode {
    match err {
        CoreError::AuthMissing | CoreError::SessionNotFound(_) => StatusCode::UNAUTHORIZED,
        CoreError::BreadcrumbOutOfRange { .. } | CoreError::NotDrillable(_) => {
            StatusCode::BAD_REQUEST
        }
        CoreError::UpstreamQuery { source, .. } | CoreError::Provider(source) => {
            upstream_status(source)
        }
    }
}

fn upstream_status(err: &AdsApiError) -> StatusCode {
    match err {
        AdsApiError::InvalidCredentials { .. } => StatusCode::UNAUTHORIZED,
        AdsApiError::PermissionDenied { .. } => StatusCode::FORBIDDEN,
        AdsApiError::CustomerNotFound { .. } => StatusCode::NOT_FOUND,
        AdsApiError::RateLimited { .. } | AdsApiError::QuotaExceeded { .. } => {
            StatusCode::TOO_MANY_REQUESTS
        }
        AdsApiError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        AdsApiError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AdsApiError::NetworkError { .. }
        | AdsApiError::InvalidQuery { .. }
        | AdsApiError::ParseError { .. }
        | AdsApiError::Unknown { .. } => StatusCode::BAD_GATEWAY,
    }
}
