//! PostgreSQL persistence for camp scheduling.
//!
//! Repositories are plain `sqlx` queries over a shared [`DbPool`]. The
//! scheduling engine in `camp-core` reaches this crate only through
//! [`load_snapshot`] and the [`PgEnrollmentStore`] write seam.

use sqlx::postgres::PgPoolOptions;

pub mod enrollment_store;
pub mod models;
pub mod repositories;
pub mod snapshot;

pub use enrollment_store::PgEnrollmentStore;
pub use snapshot::load_snapshot;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
