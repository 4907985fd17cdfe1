//! Database connection pool initialization.
//!
//! The members table is the only persistence this service owns; everything
//! session-shaped lives in the refresh store instead.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//!
//! # Panics
//!
//! [`init_db_pool`] panics if `DATABASE_URL` is unset or the connection
//! cannot be established. It runs once at startup; there is nothing
//! sensible to serve without a database.

use sqlx::PgPool;
use std::env;

/// Initializes the PostgreSQL connection pool.
///
/// The returned pool is cheaply cloneable and is shared through the
/// application state.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
