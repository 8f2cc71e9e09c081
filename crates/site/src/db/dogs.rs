//! `PostgreSQL` implementation of the dog record store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use adopt_a_dog_core::{DogId, DogRecord, NewDog};

use super::{DogStore, RepositoryError};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `dogs` queries.
#[derive(Debug, sqlx::FromRow)]
struct DogRow {
    id: DogId,
    dog_breed: String,
    image_url: String,
    is_adopted: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<DogRow> for DogRecord {
    type Error = RepositoryError;

    fn try_from(row: DogRow) -> Result<Self, Self::Error> {
        if row.dog_breed.trim().is_empty() || row.image_url.trim().is_empty() {
            return Err(RepositoryError::DataCorruption(format!(
                "dog {} is missing a breed or image URL",
                row.id
            )));
        }

        Ok(Self {
            id: row.id,
            breed: row.dog_breed,
            image_url: row.image_url,
            is_adopted: row.is_adopted,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// PgDogStore
// =============================================================================

/// Dog record store backed by the `dogs` table.
#[derive(Clone)]
pub struct PgDogStore {
    pool: PgPool,
}

impl PgDogStore {
    /// Create a new store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DogStore for PgDogStore {
    #[instrument(skip(self))]
    async fn list_dogs(&self) -> Result<Vec<DogRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, DogRow>(
            r"
            SELECT id, dog_breed, image_url, is_adopted, created_at
            FROM dogs
            ORDER BY dog_breed ASC, created_at ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DogRecord::try_from).collect()
    }

    #[instrument(skip(self), fields(breed = %dog.breed()))]
    async fn insert_dog(&self, dog: NewDog) -> Result<DogRecord, RepositoryError> {
        let row = sqlx::query_as::<_, DogRow>(
            r"
            INSERT INTO dogs (dog_breed, image_url, is_adopted)
            VALUES ($1, $2, $3)
            RETURNING id, dog_breed, image_url, is_adopted, created_at
            ",
        )
        .bind(dog.breed())
        .bind(dog.image_url())
        .bind(dog.is_adopted())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_check_violation()
            {
                return RepositoryError::Conflict("breed and image URL are required".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        DogRecord::try_from(row)
    }

    #[instrument(skip(self))]
    async fn delete_dog(&self, id: DogId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM dogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
