use std::process::ExitCode;
use std::sync::Arc;

use tokio::signal;

use users_api::api::{self, AppState};
use users_api::config::AppConfig;
use users_api::infrastructure::database;
use users_api::infrastructure::repositories::SqliteUserRepository;
use users_api::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenv::dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => {
            init_tracing(config.debug);
            config
        }
        Err(e) => {
            init_tracing(false);
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if config.uses_default_database() {
        tracing::warn!("DATABASE_URL not set, using default {}", config.database_url);
    }

    // Connect to database
    tracing::info!(url = %config.database_url, "Connecting to database...");
    let pool = match database::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = database::ensure_schema(&pool).await {
        tracing::error!(error = %e, "Failed to create users table");
        return ExitCode::FAILURE;
    }
    tracing::info!("Database ready");

    let state = AppState::new(Arc::new(SqliteUserRepository::new(pool.clone())));
    let app = api::router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind address");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Server listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    pool.close().await;

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
