//! Song catalog service (musiclib-api) - Main entry point

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use musiclib_api::cli::Args;
use musiclib_api::db::SqliteSongStore;
use musiclib_api::enrichment::MusicInfoClient;
use musiclib_api::{build_router, AppState};
use musiclib_common::config::{ServiceConfig, TomlConfig};
use musiclib_common::db::init_database;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    let args = Args::parse();

    let config_found = args.config.exists();
    let file_config = TomlConfig::load(&args.config)
        .with_context(|| format!("Failed to load config file {}", args.config.display()))?;
    let config = ServiceConfig::resolve(file_config, args.overrides())
        .context("Invalid configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        built = env!("BUILD_TIMESTAMP"),
        profile = env!("BUILD_PROFILE"),
        "Starting musiclib-api"
    );
    if dotenv_loaded {
        info!("Loaded environment from .env");
    }
    if config_found {
        info!("Config file: {}", args.config.display());
    } else {
        warn!(
            "Config file not found at {}, using defaults and overrides",
            args.config.display()
        );
    }
    let pool = init_database(&config.database)
        .await
        .context("Failed to initialize database")?;

    let store = Arc::new(SqliteSongStore::new(pool.clone()));
    let provider = Arc::new(
        MusicInfoClient::new(&config.music_api).context("Failed to create song-info client")?,
    );
    info!("Song-info service: {}", provider.base_url());

    let state = AppState::new(store, provider).with_request_timeout(config.server.request_timeout);
    let app = build_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
