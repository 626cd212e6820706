//! `micropos-api` -- HTTP server for the category and item resources.
//!
//! Settings come from `.env.{environment}` (falling back to `.env`) in the
//! config directory; server keys (`HOST`, `PORT`, `CORS_ORIGINS`,
//! `REQUEST_TIMEOUT_SECS`) are read from the same source.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use micropos_api::config::ServerConfig;
use micropos_api::router::build_app_router;
use micropos_api::state::AppState;
use micropos_core::environment::Environment;
use micropos_core::logging::{self, LogConfig};
use micropos_core::settings::{resolve_environment, Settings};
use micropos_db::PostgrestClient;

#[derive(Debug, Parser)]
#[command(name = "micropos-api", version, about = "Serve the menu API")]
struct Cli {
    /// Environment whose env file is loaded. Defaults to `ENVIRONMENT`,
    /// then development.
    #[arg(short, long)]
    env: Option<Environment>,

    /// Directory holding the env files.
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --- Configuration ---
    let environment = resolve_environment(cli.env)?;
    let (settings, source) = Settings::load(&cli.config_dir, environment)
        .with_context(|| format!("Failed to load settings for {environment}"))?;

    // --- Tracing ---
    let default_filter = if settings.debug {
        "micropos_api=debug,micropos_db=debug,tower_http=debug"
    } else {
        "micropos_api=info,micropos_db=info,tower_http=info"
    };
    logging::init(&LogConfig::from_source(&source, default_filter))?;

    let config = ServerConfig::from_source(&source)?;
    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = %environment,
        version = %settings.version,
        env_file = ?source.loaded_from(),
        "Loaded configuration"
    );

    // --- Backend ---
    let client = PostgrestClient::new(&settings.api_url, &settings.api_key)
        .context("Failed to create backend client")?;
    match micropos_db::health_check(&client).await {
        Ok(()) => tracing::info!("Backend health check passed"),
        Err(e) => tracing::warn!(error = %e, "Backend health check failed, serving anyway"),
    }

    // --- App state ---
    let state = AppState {
        client: Arc::new(client),
        settings: Arc::new(settings),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state);

    // --- Start server ---
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT or SIGTERM (Unix) to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
