use std::net::{IpAddr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinedex_api::config::{ConfigError, LogFormat, ServerConfig, StoreConfig};
use cinedex_api::router::build_app_router;
use cinedex_api::state::AppState;
use cinedex_db::store::{MemoryMovieStore, MovieStore, PgMovieStore};

/// Anything that can stop the server from starting.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid HOST address '{0}'")]
    InvalidHost(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // The subscriber is configured from this same config, so it is not up yet.
            eprintln!("cinedex-api: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.log_format);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cinedex_api=debug,cinedex_db=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

async fn run(config: ServerConfig) -> Result<(), StartupError> {
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let host: IpAddr = config
        .host
        .parse()
        .map_err(|_| StartupError::InvalidHost(config.host.clone()))?;
    let addr = SocketAddr::new(host, config.port);

    // --- Store ---
    let store = connect_store(&config.store).await?;
    tracing::info!(backend = store.backend(), "Movie store ready");

    // --- App state ---
    let shutdown_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let state = AppState {
        store: Arc::clone(&store),
        config: Arc::new(config),
    };

    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, closing store");
    if tokio::time::timeout(shutdown_timeout, store.close())
        .await
        .is_err()
    {
        tracing::warn!(?shutdown_timeout, "Store did not close in time");
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Build the configured store backend, running migrations for PostgreSQL.
async fn connect_store(config: &StoreConfig) -> Result<Arc<dyn MovieStore>, StartupError> {
    match config {
        StoreConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = cinedex_db::create_pool(database_url, *max_connections).await?;
            tracing::info!(max_connections, "Database connection pool created");

            cinedex_db::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            cinedex_db::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgMovieStore::new(pool)))
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory store; data is lost on shutdown");
            Ok(Arc::new(MemoryMovieStore::new()))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
