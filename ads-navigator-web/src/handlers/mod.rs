//! HTTP handlers

mod accounts;
mod auth;
mod navigator;

use actix_web::{HttpResponse, get, web};
use serde_json::json;

/// Routes under `/api`; the auth gate wraps the scope they are mounted in.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::list_accounts)
        .service(accounts::list_campaigns)
        .service(navigator::render)
        .service(navigator::select_root)
        .service(navigator::drill)
        .service(navigator::open_breadcrumb)
        .service(navigator::search)
        .service(navigator::set_page)
        .service(auth::logout);
}

#[get("/healthz")]
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
