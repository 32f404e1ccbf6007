//! Account tree resolution
//!
//! Lists the accounts a credential can reach and the rows below one account:
//! client accounts for a manager, campaigns for a leaf. Only one manager
//! level is modelled; client accounts are never expanded as managers here.

use std::sync::Arc;

use ads_navigator_provider::{
    customer_id_from_resource, queries, AdsApiError, AdsCredential, AdsRow, CustomerResource,
};
use futures::future::join_all;

use crate::error::{CoreError, CoreResult};
use crate::types::{
    placeholder_name, Account, Campaign, CampaignRow, ClientAccountRow, ResolutionFailureKind,
    ResolutionWarning, RootAccountListing,
};

use super::ServiceContext;

/// Account tree resolver
pub struct AccountTreeService {
    ctx: Arc<ServiceContext>,
}

impl AccountTreeService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Every account the credential can access, in the order the API lists them.
    ///
    /// Only the accessible-customers call can fail the listing. A failed detail
    /// lookup for one account yields a placeholder plus a warning.
    pub async fn list_root_accounts(
        &self,
        credential: &AdsCredential,
    ) -> CoreResult<RootAccountListing> {
        let resources = self
            .ctx
            .ads_api
            .list_accessible_customers(credential)
            .await
            .inspect_err(|e| log_upstream("listAccessibleCustomers", e))?;

        let lookups = resources
            .iter()
            .map(|resource| self.resolve_account(credential, resource));
        let resolved = join_all(lookups).await;

        let mut listing = RootAccountListing::default();
        for (account, warning) in resolved {
            listing.accounts.push(account);
            listing.warnings.extend(warning);
        }
        Ok(listing)
    }

    async fn resolve_account(
        &self,
        credential: &AdsCredential,
        resource: &CustomerResource,
    ) -> (Account, Option<ResolutionWarning>) {
        let id = &resource.customer_id;
        let result = self
            .ctx
            .ads_api
            .query_customer(credential, id, queries::CUSTOMER_DETAILS)
            .await;

        let failure = match result {
            Ok(rows) => {
                if let Some(customer) = rows.into_iter().find_map(|r| r.customer) {
                    let account_id = customer.id.map_or_else(|| id.clone(), |v| v.to_string());
                    let display_name = customer
                        .descriptive_name
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| placeholder_name(&account_id));
                    let account = Account {
                        id: account_id,
                        resource_name: resource.resource_name.clone(),
                        display_name,
                        is_manager: customer.manager,
                    };
                    return (account, None);
                }
                ResolutionWarning {
                    account_id: id.clone(),
                    kind: ResolutionFailureKind::NoDetails,
                    message: "customer query returned no rows".to_string(),
                }
            }
            Err(e) => ResolutionWarning {
                account_id: id.clone(),
                kind: ResolutionFailureKind::from(&e),
                message: e.detail(),
            },
        };

        log::warn!(
            "Using placeholder for customer {id} ({:?}): {}",
            failure.kind,
            failure.message
        );
        (Account::placeholder(resource), Some(failure))
    }

    /// Rows below `account_id`: enabled non-manager clients when it is a
    /// manager, otherwise its campaigns with metrics ordered by name.
    pub async fn list_child_rows(
        &self,
        credential: &AdsCredential,
        account_id: &str,
    ) -> CoreResult<Vec<CampaignRow>> {
        if self.is_manager(credential, account_id).await? {
            let rows = self
                .query(credential, account_id, queries::ENABLED_CLIENT_ACCOUNTS)
                .await?;
            Ok(rows.into_iter().filter_map(client_account_row).collect())
        } else {
            let rows = self
                .query(credential, account_id, queries::CAMPAIGNS_WITH_METRICS)
                .await?;
            Ok(rows.into_iter().filter_map(campaign_row).collect())
        }
    }

    /// Reads `customer.manager`; no row means not a manager.
    async fn is_manager(&self, credential: &AdsCredential, account_id: &str) -> CoreResult<bool> {
        let rows = self
            .query(credential, account_id, queries::CUSTOMER_MANAGER_FLAG)
            .await?;
        Ok(rows
            .into_iter()
            .find_map(|r| r.customer)
            .is_some_and(|c| c.manager))
    }

    async fn query(
        &self,
        credential: &AdsCredential,
        account_id: &str,
        query: &str,
    ) -> CoreResult<Vec<AdsRow>> {
        self.ctx
            .ads_api
            .query_customer(credential, account_id, query)
            .await
            .map_err(|source| {
                log_upstream(account_id, &source);
                CoreError::UpstreamQuery {
                    account_id: account_id.to_string(),
                    source,
                }
            })
    }
}

fn log_upstream(target: &str, e: &AdsApiError) {
    if e.is_expected() {
        log::warn!("Ads query for {target} failed: {e}");
    } else {
        log::error!("Ads query for {target} failed: {e}");
    }
}

fn client_account_row(row: AdsRow) -> Option<CampaignRow> {
    let client = row.customer_client?;
    let Some(id) = customer_id_from_resource(&client.client_customer) else {
        log::warn!("Skipping client row with resource '{}'", client.client_customer);
        return None;
    };
    let name = client
        .descriptive_name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("Account {id}"));
    Some(CampaignRow::ClientAccount(ClientAccountRow { id, name }))
}

fn campaign_row(row: AdsRow) -> Option<CampaignRow> {
    let campaign = row.campaign?;
    let (clicks, impressions) = row.metrics.map_or((0, 0), |m| {
        (
            u64::try_from(m.clicks).unwrap_or(0),
            u64::try_from(m.impressions).unwrap_or(0),
        )
    });
    Some(CampaignRow::Campaign(Campaign {
        id: campaign.id.map(|v| v.to_string()).unwrap_or_default(),
        name: campaign.name,
        status: campaign.status,
        clicks,
        impressions,
    }))
}
