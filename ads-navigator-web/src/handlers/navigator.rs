//! Session navigator
//!
//! Each action updates the session's controller and answers with the new
//! render model. Actions that open an account fetch its listing before
//! answering; a response overtaken by a newer action is dropped by the
//! controller and the newer state is returned instead.

use actix_web::{HttpResponse, get, post, web};
use ads_navigator_core::services::{Completion, FetchTicket};
use ads_navigator_provider::AdsCredential;
use serde::Deserialize;
use tracing_attributes::instrument;

use crate::error::ApiError;
use crate::session::{CurrentSession, Session};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AccountTarget {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: String,
}

async fn load(
    state: &AppState,
    session: &Session,
    credential: &AdsCredential,
    ticket: &FetchTicket,
) -> HttpResponse {
    let navigator = session.navigator();
    if navigator.fetch(&state.campaigns, credential, ticket).await == Completion::Stale {
        tracing::debug!(generation = ticket.generation(), "Superseded by a newer action");
    }
    HttpResponse::Ok().json(navigator.render().await)
}

#[get("/ads/navigator")]
#[instrument(skip_all, fields(session = %session.0.id()))]
pub async fn render(
    state: web::Data<AppState>,
    session: CurrentSession,
) -> Result<HttpResponse, ApiError> {
    state.credential(&session.0).await?;
    Ok(HttpResponse::Ok().json(session.0.navigator().render().await))
}

/// Selects a root account; an empty id clears the selection.
#[post("/ads/navigator/root")]
#[instrument(skip_all, fields(session = %session.0.id(), account_id = %body.id))]
pub async fn select_root(
    state: web::Data<AppState>,
    session: CurrentSession,
    body: web::Json<AccountTarget>,
) -> Result<HttpResponse, ApiError> {
    let credential = state.credential(&session.0).await?;
    let ticket = session.0.navigator().select_root(&body.id, &body.name).await;
    Ok(load(&state, &session.0, &credential, &ticket).await)
}

#[post("/ads/navigator/drill")]
#[instrument(skip_all, fields(session = %session.0.id(), account_id = %body.id))]
pub async fn drill(
    state: web::Data<AppState>,
    session: CurrentSession,
    body: web::Json<AccountTarget>,
) -> Result<HttpResponse, ApiError> {
    let credential = state.credential(&session.0).await?;
    let ticket = session
        .0
        .navigator()
        .drill_into(&body.id, &body.name)
        .await
        .map_err(|e| state.api_error(&e))?;
    Ok(load(&state, &session.0, &credential, &ticket).await)
}

#[post("/ads/navigator/breadcrumb/{index}")]
#[instrument(skip_all, fields(session = %session.0.id(), index = *path))]
pub async fn open_breadcrumb(
    state: web::Data<AppState>,
    session: CurrentSession,
    path: web::Path<usize>,
) -> Result<HttpResponse, ApiError> {
    let credential = state.credential(&session.0).await?;
    let ticket = session
        .0
        .navigator()
        .open_breadcrumb(path.into_inner())
        .await
        .map_err(|e| state.api_error(&e))?;
    Ok(load(&state, &session.0, &credential, &ticket).await)
}

#[post("/ads/navigator/search")]
#[instrument(skip_all, fields(session = %session.0.id()))]
pub async fn search(
    state: web::Data<AppState>,
    session: CurrentSession,
    body: web::Json<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    state.credential(&session.0).await?;
    let model = session.0.navigator().search(&body.term).await;
    Ok(HttpResponse::Ok().json(model))
}

#[post("/ads/navigator/page/{page}")]
#[instrument(skip_all, fields(session = %session.0.id(), page = *path))]
pub async fn set_page(
    state: web::Data<AppState>,
    session: CurrentSession,
    path: web::Path<usize>,
) -> Result<HttpResponse, ApiError> {
    state.credential(&session.0).await?;
    let model = session.0.navigator().set_page(path.into_inner()).await;
    Ok(HttpResponse::Ok().json(model))
}
