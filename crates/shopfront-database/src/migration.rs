//! Schema migrations embedded at build time.

use sqlx::PgPool;
use tracing::info;

use shopfront_core::error::{AppError, ErrorKind};
use shopfront_core::result::AppResult;

/// Applies pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Applying schema migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e))?;

    info!("Schema is up to date");
    Ok(())
}
