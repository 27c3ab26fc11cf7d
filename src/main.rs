/*****************************************************************************************
 *
 *  reqstore – single-endpoint in-memory key-value service
 *
 *****************************************************************************************/

use std::process::ExitCode;

use axum::serve;
use tokio::net::TcpListener;
use tracing_subscriber::FmtSubscriber;

use reqstore::{build_app, AppConfig, KvStore, SharedStore};

#[tokio::main]
async fn main() -> ExitCode {
    //
    // ────────────────────────────────────────────────────────
    //  Load configuration (config.json or defaults)
    // ────────────────────────────────────────────────────────
    //
    let (cfg, config_path) = match AppConfig::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("reqstore: {e}");
            return ExitCode::FAILURE;
        }
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.level_filter())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("reqstore: failed to set tracing subscriber: {e}");
        return ExitCode::FAILURE;
    }

    match &config_path {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("No config.json found, using defaults"),
    }
    tracing::info!("Configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Build store and app, then serve
    // ────────────────────────────────────────────────────────
    //
    let store = KvStore::shared();
    let app = build_app(store.clone());

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind {addr}: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Listening on http://{}/req", addr);

    if let Err(e) = serve(listener, app)
        .with_graceful_shutdown(shutdown(store))
        .await
    {
        tracing::error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown(store: SharedStore) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::warn!("CTRL+C received, shutting down with {} keys in memory", store.len());
}
