use ads_navigator_provider::{AdsApiError, CustomerResource};
use serde::{Deserialize, Serialize};

/// An advertising account reachable by the session's credential.
///
/// Identity is `id`. Serialized with the field names the dashboard has always
/// consumed (`descriptive_name`, `is_manager`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub resource_name: String,
    #[serde(rename = "descriptive_name")]
    pub display_name: String,
    pub is_manager: bool,
}

impl Account {
    /// Stand-in used when an account's details cannot be read.
    #[must_use]
    pub fn placeholder(resource: &CustomerResource) -> Self {
        Self {
            id: resource.customer_id.clone(),
            resource_name: resource.resource_name.clone(),
            display_name: placeholder_name(&resource.customer_id),
            is_manager: false,
        }
    }
}

/// `"Customer {id}"`
#[must_use]
pub fn placeholder_name(customer_id: &str) -> String {
    format!("Customer {customer_id}")
}

/// Why an account in a root listing is shown as a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionFailureKind {
    PermissionDenied,
    NotFound,
    /// The lookup succeeded but returned no customer row.
    NoDetails,
    Other,
}

impl From<&AdsApiError> for ResolutionFailureKind {
    fn from(err: &AdsApiError) -> Self {
        match err {
            AdsApiError::PermissionDenied { .. } => Self::PermissionDenied,
            AdsApiError::CustomerNotFound { .. } => Self::NotFound,
            _ => Self::Other,
        }
    }
}

/// A per-account lookup that fell back to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionWarning {
    pub account_id: String,
    pub kind: ResolutionFailureKind,
    pub message: String,
}

/// Result of listing the root accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootAccountListing {
    pub accounts: Vec<Account>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ResolutionWarning>,
}
