mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use babyhub_assist::AssistClient;
use babyhub_core::{load_catalog, AppConfig, Catalog};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    middleware::AssistQuota,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = babyhub_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(env = %config.env, bind_addr = %config.bind_addr, "starting babyhub-server");

    let catalog = Arc::new(open_catalog(&config)?);
    tracing::info!(
        products = catalog.len(),
        categories = catalog.categories().len(),
        "catalog loaded"
    );

    let assist = AssistClient::new(
        &config.assist_base_url,
        config.assist_timeout_secs,
        config.assist_connect_timeout_secs,
    )?
    .with_retry(config.assist_max_retries, config.assist_retry_backoff_base_ms);

    let quota = AssistQuota::new(
        config.assist_quota_max_requests,
        Duration::from_secs(config.assist_quota_window_secs),
    );
    let app = build_app(AppState { catalog, assist }, quota);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// A catalog that fails to load stops startup; no page can be served without it.
fn open_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    match &config.catalog_path {
        Some(path) => load_catalog(path)
            .with_context(|| format!("loading catalog from {}", path.display())),
        None => Catalog::bundled().context("loading bundled catalog"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
