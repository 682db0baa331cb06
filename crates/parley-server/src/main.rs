mod config;

use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use parley_api::health::Readiness;
use parley_api::{AppState, AppStateInner};
use parley_db::Store;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let readiness = Readiness::new();
    let state: AppState = Arc::new(AppStateInner {
        store: Store::new(),
        readiness: readiness.clone(),
    });

    let app = parley_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!("Parley listening on {}", config.addr);

    readiness.mark_ready();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(readiness.clone(), config.shutdown_grace))
        .await?;
    readiness.mark_draining();

    info!("Parley stopped");
    Ok(())
}

/// Resolves once a shutdown signal has been received and the grace period
/// has passed. `/ready` reports 503 for the whole grace period.
async fn shutdown_signal(readiness: Readiness, grace: Duration) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await;
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await;
        info!("Received Ctrl+C, shutting down...");
    }

    readiness.mark_draining();
    info!("Draining for {:?} before closing the listener", grace);
    tokio::time::sleep(grace).await;
}
