use std::sync::Arc;

use anyhow::{Context, Result};
use creature_catalog::{
    CatalogService, SeedService,
    build_router,
    config::AppConfig,
    infrastructure::{CreatureStore, HttpAdapter, InMemoryCreatureStore, ReqwestHttpAdapter},
    state::AppState,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env().context("failed to load application configuration")?;

    let store: Arc<dyn CreatureStore> = Arc::new(InMemoryCreatureStore::new());
    let http: Arc<dyn HttpAdapter> = Arc::new(
        ReqwestHttpAdapter::new(&config.http_client()).context("failed to build HTTP client")?,
    );

    let catalog = CatalogService::new(store.clone(), config.default_limit);
    let seed = SeedService::new(store, http, config.seed_source());
    let app = build_router(AppState::new(catalog, seed));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(
        address = %config.bind_addr,
        default_limit = config.default_limit,
        seed_source = %config.seed_source_url,
        "creature catalog started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("creature_catalog=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
