//! Persistence gateway for the rentals backend.
//!
//! Owns the PostgreSQL connection pool, the embedded migrations, the
//! entity models with their row mappers, and the repositories. Nothing
//! else in the workspace talks to the database directly.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod scan;

pub type DbPool = sqlx::PgPool;

/// Bounds applied to the connection pool.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Upper bound on open connections (default: `10`).
    pub max_connections: u32,
    /// Connections kept open while idle (default: `5`).
    pub min_connections: u32,
    /// A connection is closed and replaced after this long (default: 5 minutes).
    pub max_lifetime: Duration,
    /// Idle connections above `min_connections` are closed after this long.
    pub idle_timeout: Duration,
    /// How long a request waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 5,
            max_lifetime: Duration::from_secs(5 * 60),
            idle_timeout: Duration::from_secs(60),
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections.min(settings.max_connections))
        .max_lifetime(settings.max_lifetime)
        .idle_timeout(settings.idle_timeout)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to prove the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations under `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
