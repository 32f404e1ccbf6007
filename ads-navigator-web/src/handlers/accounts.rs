//! Account and campaign listings

use actix_web::{HttpResponse, get, web};
use serde_json::json;
use tracing_attributes::instrument;

use crate::error::ApiError;
use crate::session::CurrentSession;
use crate::state::AppState;

/// `{ accounts, warnings? }`, or `{ accounts: [], needs_auth: true }` while
/// the session has no Ads account connected.
#[get("/ads/accounts")]
#[instrument(skip_all, fields(session = %session.0.id()))]
pub async fn list_accounts(
    state: web::Data<AppState>,
    session: CurrentSession,
) -> Result<HttpResponse, ApiError> {
    let credential = state
        .ctx
        .credential_provider
        .ads_credential(session.0.id())
        .await
        .map_err(|e| state.api_error(&e))?;

    let Some(credential) = credential else {
        return Ok(HttpResponse::Ok().json(json!({ "accounts": [], "needs_auth": true })));
    };

    let listing = state
        .accounts
        .list_root_accounts(&credential)
        .await
        .map_err(|e| state.api_error(&e))?;
    tracing::debug!(
        accounts = listing.accounts.len(),
        warnings = listing.warnings.len(),
        "Listed root accounts"
    );
    Ok(HttpResponse::Ok().json(listing))
}

/// `{ campaigns }`: client accounts of a manager, or a leaf's campaigns.
#[get("/ads/campaigns/{account_id}")]
#[instrument(skip_all, fields(session = %session.0.id(), account_id = %path))]
pub async fn list_campaigns(
    state: web::Data<AppState>,
    session: CurrentSession,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let credential = state.credential(&session.0).await?;
    let rows = state
        .accounts
        .list_child_rows(&credential, &path)
        .await
        .map_err(|e| state.api_error(&e))?;
    Ok(HttpResponse::Ok().json(json!({ "campaigns": rows })))
}
