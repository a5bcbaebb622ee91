use log::info;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;
use crate::error::AppError;

/// Opens the shared connection pool. The pool is safe to clone into every
/// worker; callers never lock around it.
pub async fn connect(config: &Config) -> Result<PgPool, AppError> {
    info!("connecting to database");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    info!("database connected");
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| AppError::Storage(format!("migration failed: {}", e)))?;
    info!("migrations applied");
    Ok(())
}
