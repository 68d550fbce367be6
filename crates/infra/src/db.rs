use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::StoreResult;

pub type Db = PgPool;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone)]
pub enum StoreBackend {
    Postgres(PgConfig),
    /// Process-local store; contents are lost on exit.
    Memory,
}

#[derive(Debug, Clone)]
pub struct PgConfig {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

/// Open the pool and, unless disabled, bring the schema up to date.
pub async fn connect(config: &PgConfig) -> StoreResult<Db> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .idle_timeout(Some(Duration::from_secs(600))) // 10 minutes
        .max_lifetime(Some(Duration::from_secs(1800))) // 30 minutes
        .connect(&config.url)
        .await?;
    tracing::info!(
        "Connected to Postgres with max {} connections",
        config.max_connections
    );

    if config.run_migrations {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("../../migrations").run(&pool).await?;
        tracing::info!("Database migrations completed successfully");
    } else {
        tracing::info!("Skipping database migrations (SKIP_MIGRATIONS=true)");
    }

    Ok(pool)
}
