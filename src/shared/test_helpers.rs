#[cfg(test)]
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Fresh in-memory database with the production schema applied.
///
/// An in-memory SQLite database lives as long as its connection, so the pool is
/// pinned to a single connection that never expires.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid in-memory url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory sqlite pool");

    crate::core::database::run_migrations(&pool)
        .await
        .expect("migrations apply");

    pool
}
