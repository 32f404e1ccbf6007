//! Session teardown

use actix_web::cookie::Cookie;
use actix_web::{HttpResponse, post, web};
use serde_json::json;
use tracing_attributes::instrument;

use crate::error::ApiError;
use crate::session::CurrentSession;
use crate::state::AppState;

/// Ends the session, forgets its Ads credential and clears the cookie.
#[post("/auth/logout")]
#[instrument(skip_all, fields(session = %session.0.id()))]
pub async fn logout(
    state: web::Data<AppState>,
    session: CurrentSession,
) -> Result<HttpResponse, ApiError> {
    state
        .end_session(session.0.id())
        .await
        .map_err(|e| state.api_error(&e))?;
    tracing::info!("Session ended");

    let mut cookie = Cookie::new(state.cookie_name().to_string(), "");
    cookie.set_path("/");
    cookie.make_removal();
    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "Logout successful" })))
}
