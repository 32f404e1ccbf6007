//! Ads Navigator web service
//!
//! actix-web front end for the navigation engine: the account and campaign
//! listing endpoints, a per-session navigator, and the session gate in front
//! of every `/api` route.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod session;
pub mod state;

use actix_web::web;

/// Mounts every route. `AppState` must be registered as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::healthz).service(
        web::scope("/api")
            .wrap(session::AuthGate)
            .configure(handlers::configure_api),
    );
}
