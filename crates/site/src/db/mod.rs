//! Dog Record Store.
//!
//! # Database
//!
//! ## Tables
//!
//! - `dogs` - Dog records (breed, image URL, adoption status)
//! - `tower_sessions.session` - Session storage (created by the session store)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/` and embedded in the
//! binary. They run at startup unless `SITE_RUN_MIGRATIONS=false`.

pub mod dogs;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use adopt_a_dog_core::{DogId, DogRecord, NewDog};

pub use dogs::PgDogStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., empty breed).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Network-backed store holding dog records.
///
/// Each call is one independent round trip; there is no client-side locking
/// and no version check between calls.
#[async_trait]
pub trait DogStore: Send + Sync {
    /// All records ordered by breed ascending, ties in insertion order.
    async fn list_dogs(&self) -> Result<Vec<DogRecord>, RepositoryError>;

    /// Insert a record, returning it with its store-assigned ID.
    async fn insert_dog(&self, dog: NewDog) -> Result<DogRecord, RepositoryError>;

    /// Delete a record by ID.
    ///
    /// Returns `RepositoryError::NotFound` if no record has this ID.
    async fn delete_dog(&self, id: DogId) -> Result<(), RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded migrations.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
