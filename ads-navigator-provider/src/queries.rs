//! Search queries used by the navigator.
//!
//! Kept in one place so the row shapes the engine expects (see
//! [`AdsRow`](crate::AdsRow)) stay in step with what is selected.

/// The customer's own id, name and manager flag.
pub const CUSTOMER_DETAILS: &str =
    "SELECT customer.id, customer.descriptive_name, customer.manager FROM customer LIMIT 1";

/// Only the manager flag, used before listing an account's children.
pub const CUSTOMER_MANAGER_FLAG: &str = "SELECT customer.manager FROM customer LIMIT 1";

/// Enabled, non-manager client accounts linked under a manager.
pub const ENABLED_CLIENT_ACCOUNTS: &str = "SELECT customer_client.client_customer, \
     customer_client.descriptive_name \
     FROM customer_client \
     WHERE customer_client.manager = false AND customer_client.status = 'ENABLED'";

/// Campaigns of a leaf account with their click and impression totals.
pub const CAMPAIGNS_WITH_METRICS: &str = "SELECT campaign.id, campaign.name, campaign.status, \
     metrics.clicks, metrics.impressions \
     FROM campaign \
     ORDER BY campaign.name";
