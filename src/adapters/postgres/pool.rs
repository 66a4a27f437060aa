//! Process-wide PostgreSQL connection pool.
//!
//! The pool is shared by every request and has an explicit lifecycle:
//! [`init`] exactly once at process start, [`get`] everywhere else,
//! [`close`] on shutdown. It is never re-created per request.

use once_cell::sync::OnceCell;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::DatabaseConfig;

static POOL: OnceCell<PgPool> = OnceCell::new();

/// Errors from pool lifecycle management.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("connection pool already initialized")]
    AlreadyInitialized,

    #[error("connection pool not initialized")]
    NotInitialized,

    #[error("failed to connect to database: {0}")]
    Connect(#[from] sqlx::Error),
}

/// Initializes the global pool from configuration.
///
/// Fails if called twice or if the database is unreachable.
pub async fn init(config: &DatabaseConfig) -> Result<&'static PgPool, PoolError> {
    if POOL.get().is_some() {
        return Err(PoolError::AlreadyInitialized);
    }

    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await?;

    POOL.set(pool).map_err(|_| PoolError::AlreadyInitialized)?;
    POOL.get().ok_or(PoolError::NotInitialized)
}

/// Returns the initialized pool.
pub fn get() -> Result<&'static PgPool, PoolError> {
    POOL.get().ok_or(PoolError::NotInitialized)
}

/// Closes all pooled connections. Safe to call when uninitialized.
pub async fn close() {
    if let Some(pool) = POOL.get() {
        pool.close().await;
    }
}
