//! Database migration runner.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use bizhub_core::error::{AppError, ErrorKind};

/// Embedded migrations from the workspace `migrations/` directory.
static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the schema up to date. Runs at startup, before the pool is
/// handed to the repositories.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(
        migrations = MIGRATOR.migrations.len(),
        "Applying database migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database schema is up to date");
    Ok(())
}
