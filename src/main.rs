//! ADP Server - Half-PPR average draft position data over HTTP
//!
//! Reads the bundled ADP CSV on each request, derives rank and ESPN savings,
//! and returns the rows as JSON.

mod config;
mod data;
mod routes;
mod service;

use anyhow::Context;
use clap::Parser;
use config::Settings;
use service::AdpService;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let service = AdpService::new(settings.resolved_data_path());
    tracing::info!(path = %service.data_path().display(), "adp dataset");
    let app = routes::build_router(service);

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
