//! Shopfront server.
//!
//! Loads configuration, selects the credential store and serves the auth API.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use shopfront_auth::{CredentialStore, MemoryCredentialStore, PasswordHasher};
use shopfront_core::config::{AppConfig, StoreProvider};
use shopfront_core::error::AppError;
use shopfront_database::{DatabasePool, UserRepository, migration};

#[tokio::main]
async fn main() {
    let env = std::env::var("SHOPFRONT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Shopfront v{}", env!("CARGO_PKG_VERSION"));

    let hasher = Arc::new(PasswordHasher::new());
    let (store, db) = open_store(&config, &hasher).await?;

    match store.health_check().await {
        Ok(()) => tracing::info!(provider = ?config.store.provider, "Credential store connected"),
        Err(e) => tracing::warn!(provider = ?config.store.provider, error = %e, "Credential store unreachable"),
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = shopfront_api::AppState::new(config, store, hasher)?;
    let app = shopfront_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(addr = %addr, "Shopfront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(db) = db {
        db.close().await;
    }

    tracing::info!("Shopfront shut down gracefully");
    Ok(())
}

async fn open_store(
    config: &AppConfig,
    hasher: &PasswordHasher,
) -> Result<(Arc<dyn CredentialStore>, Option<DatabasePool>), AppError> {
    match config.store.provider {
        StoreProvider::Postgres => {
            let db = DatabasePool::connect(&config.database).await?;
            migration::run_migrations(db.pool()).await?;
            let repo: Arc<dyn CredentialStore> = Arc::new(UserRepository::new(db.pool().clone()));
            Ok((repo, Some(db)))
        }
        StoreProvider::Memory => {
            let store = MemoryCredentialStore::new();
            let seeded = store.seed(hasher, &config.store.seed)?;
            tracing::info!(seeded, "Using in-memory credential store");
            let store: Arc<dyn CredentialStore> = Arc::new(store);
            Ok((store, None))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
