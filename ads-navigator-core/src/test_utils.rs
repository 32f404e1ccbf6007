//! Test helper module
//!
//! Provides a scripted Ads API mock and convenient factory methods.

use std::collections::HashMap;
use std::sync::Arc;

use ads_navigator_provider::{
    queries, AdsApi, AdsApiError, AdsCredential, AdsRow, CampaignFields, CustomerClientFields,
    CustomerFields, CustomerResource, MetricsFields,
};
use async_trait::async_trait;
use tokio::sync::{Notify, RwLock};

use crate::services::ServiceContext;
use crate::traits::InMemoryCredentialProvider;

// ===== MockAdsApi =====

#[derive(Default)]
struct MockCustomer {
    name: Option<String>,
    manager: bool,
    /// The details query succeeds but returns no rows.
    details_hidden: bool,
    clients: Vec<(String, String)>,
    campaigns: Vec<AdsRow>,
}

#[derive(Default)]
struct MockState {
    accessible: Vec<String>,
    accessible_failure: Option<AdsApiError>,
    customers: HashMap<String, MockCustomer>,
    failures: HashMap<String, AdsApiError>,
    gates: HashMap<String, Arc<Notify>>,
    calls: Vec<(String, String)>,
}

/// Ads API answering the navigator's queries from an in-memory account table.
#[derive(Default)]
pub struct MockAdsApi {
    state: RwLock<MockState>,
}

impl MockAdsApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_manager(&self, id: &str, name: &str, clients: &[(&str, &str)]) {
        self.state.write().await.customers.insert(
            id.to_string(),
            MockCustomer {
                name: Some(name.to_string()),
                manager: true,
                clients: clients
                    .iter()
                    .map(|(cid, cname)| ((*cid).to_string(), (*cname).to_string()))
                    .collect(),
                ..MockCustomer::default()
            },
        );
    }

    pub async fn add_leaf(&self, id: &str, name: &str, campaigns: Vec<AdsRow>) {
        self.state.write().await.customers.insert(
            id.to_string(),
            MockCustomer {
                name: Some(name.to_string()),
                campaigns,
                ..MockCustomer::default()
            },
        );
    }

    /// A customer whose details query returns an empty result.
    pub async fn add_hidden(&self, id: &str) {
        self.state.write().await.customers.insert(
            id.to_string(),
            MockCustomer {
                details_hidden: true,
                ..MockCustomer::default()
            },
        );
    }

    pub async fn set_accessible(&self, ids: &[&str]) {
        self.state.write().await.accessible = ids.iter().map(|s| (*s).to_string()).collect();
    }

    pub async fn fail_accessible(&self, err: AdsApiError) {
        self.state.write().await.accessible_failure = Some(err);
    }

    /// Every query against `id` fails with `err`.
    pub async fn fail_customer(&self, id: &str, err: AdsApiError) {
        self.state.write().await.failures.insert(id.to_string(), err);
    }

    /// The next query against `id` waits until the returned handle is notified.
    pub async fn gate(&self, id: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.state
            .write()
            .await
            .gates
            .insert(id.to_string(), notify.clone());
        notify
    }

    /// `(customer_id, query)` pairs in call order.
    pub async fn calls(&self) -> Vec<(String, String)> {
        self.state.read().await.calls.clone()
    }
}

#[async_trait]
impl AdsApi for MockAdsApi {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn list_accessible_customers(
        &self,
        _credential: &AdsCredential,
    ) -> ads_navigator_provider::Result<Vec<CustomerResource>> {
        let state = self.state.read().await;
        if let Some(err) = &state.accessible_failure {
            return Err(err.clone());
        }
        state
            .accessible
            .iter()
            .map(|id| CustomerResource::parse(&format!("customers/{id}")))
            .collect()
    }

    async fn query_customer(
        &self,
        _credential: &AdsCredential,
        customer_id: &str,
        query: &str,
    ) -> ads_navigator_provider::Result<Vec<AdsRow>> {
        let gate = {
            let mut state = self.state.write().await;
            state
                .calls
                .push((customer_id.to_string(), query.to_string()));
            state.gates.remove(customer_id)
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let state = self.state.read().await;
        if let Some(err) = state.failures.get(customer_id) {
            return Err(err.clone());
        }
        let Some(customer) = state.customers.get(customer_id) else {
            return Err(AdsApiError::CustomerNotFound {
                customer_id: customer_id.to_string(),
                raw_message: None,
            });
        };

        match query {
            q if q == queries::CUSTOMER_DETAILS => {
                if customer.details_hidden {
                    return Ok(Vec::new());
                }
                Ok(vec![AdsRow {
                    customer: Some(CustomerFields {
                        resource_name: Some(format!("customers/{customer_id}")),
                        id: customer_id.parse().ok(),
                        descriptive_name: customer.name.clone(),
                        manager: customer.manager,
                    }),
                    ..AdsRow::default()
                }])
            }
            q if q == queries::CUSTOMER_MANAGER_FLAG => Ok(vec![AdsRow {
                customer: Some(CustomerFields {
                    manager: customer.manager,
                    ..CustomerFields::default()
                }),
                ..AdsRow::default()
            }]),
            q if q == queries::ENABLED_CLIENT_ACCOUNTS => Ok(customer
                .clients
                .iter()
                .map(|(id, name)| AdsRow {
                    customer_client: Some(CustomerClientFields {
                        client_customer: format!("customers/{id}"),
                        descriptive_name: Some(name.clone()).filter(|n| !n.is_empty()),
                        manager: false,
                        status: Some("ENABLED".to_string()),
                    }),
                    ..AdsRow::default()
                })
                .collect()),
            q if q == queries::CAMPAIGNS_WITH_METRICS => {
                if customer.manager {
                    return Err(AdsApiError::InvalidQuery {
                        detail: "REQUESTED_METRICS_FOR_MANAGER".to_string(),
                    });
                }
                Ok(customer.campaigns.clone())
            }
            other => Err(AdsApiError::InvalidQuery {
                detail: format!("unexpected query: {other}"),
            }),
        }
    }
}

// ===== Factories =====

pub fn credential() -> AdsCredential {
    AdsCredential::new("1//test-refresh-token")
}

pub fn context(api: Arc<MockAdsApi>) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(
        api,
        Arc::new(InMemoryCredentialProvider::new()),
    ))
}

/// `n` campaign rows named `"{prefix} 01"`, `"{prefix} 02"`, ... in name order.
pub fn campaigns(n: usize, prefix: &str) -> Vec<AdsRow> {
    (1..=n)
        .map(|i| campaign(i, &format!("{prefix} {i:02}")))
        .collect()
}

/// Campaign rows with the given names, ids assigned in order.
pub fn named_campaigns(names: &[&str]) -> Vec<AdsRow> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| campaign(i + 1, name))
        .collect()
}

fn campaign(i: usize, name: &str) -> AdsRow {
    let n = i64::try_from(i).unwrap_or(i64::MAX);
    AdsRow {
        campaign: Some(CampaignFields {
            id: Some(1000 + n),
            name: name.to_string(),
            status: "ENABLED".to_string(),
        }),
        metrics: Some(MetricsFields {
            clicks: n * 3,
            impressions: n * 100,
        }),
        ..AdsRow::default()
    }
}
