//! Embedded schema migrations.

use sqlx::PgPool;
use tracing::info;

use deskbook_core::AppResult;
use deskbook_core::error::{AppError, ErrorKind};

/// Apply every pending migration from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    info!("Applying schema migrations");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to apply migrations: {e}"),
                e,
            )
        })?;

    info!("Schema is up to date");
    Ok(())
}
