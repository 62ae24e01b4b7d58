//! # condo-laundry binary
//!
//! Loads settings, installs logging and serves the resident and admin pages.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use cl_api::{configure_routes, middleware, AppState};
use cl_config::Settings;
use cl_core::HttpTransport;
use cl_pages::ResidentPage;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "http-reqwest")]
use cl_http_reqwest::ReqwestTransport;

#[cfg(not(feature = "http-reqwest"))]
compile_error!("condo-laundry needs a backend transport; enable the `http-reqwest` feature");

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings);
    run(settings).await
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if settings.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(mut settings: Settings) -> anyhow::Result<()> {
    let session_cookie = settings.backend.session_cookie.take();
    if session_cookie.is_none() {
        tracing::warn!("No backend session cookie configured; admin requests will be rejected");
    }
    let transport: Box<dyn HttpTransport> = Box::new(ReqwestTransport::new(
        &settings.backend.base_url,
        session_cookie,
    )?);

    let state = web::Data::new(AppState::new(
        ResidentPage::new(settings.resident.clone()),
        transport,
    ));

    let (host, port) = settings.bind_address();
    tracing::info!(
        %host,
        port,
        backend = %settings.backend.base_url,
        "condo-laundry starting"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::security_headers())
            .wrap(middleware::standard_middleware())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("binding {host}:{port}"))?
    .run()
    .await?;

    Ok(())
}
