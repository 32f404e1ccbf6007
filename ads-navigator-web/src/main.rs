//! Ads Navigator HTTP server entry point

use actix_web::{App, HttpServer, middleware, web};
use ads_navigator_provider::create_ads_api;
use ads_navigator_web::config::AppConfig;
use ads_navigator_web::state::AppState;
use ads_navigator_web::{configure, logging};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let _log_guard = logging::init(&config.log)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        production = config.server.production,
        "Starting Ads Navigator"
    );
    tracing::debug!(google_ads = ?config.google_ads, "Ads API settings");

    let ads_api = create_ads_api(config.google_ads.clone())?;
    tracing::info!(backend = ads_api.id(), "Ads API client ready");

    let state = web::Data::new(AppState::new(ads_api, &config));
    state.seed_sessions(&config.session.dev_sessions).await?;

    let bind = (config.server.host.clone(), config.server.port);
    let workers = config.workers();
    tracing::info!(host = %bind.0, port = bind.1, workers, "Listening");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .workers(workers)
    .bind(bind)?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
