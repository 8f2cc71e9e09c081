//! Dog Gallery / Admin Panel.
//!
//! Reads the full record list and carries out the admin's add and delete
//! actions. Deletes go through a [`DeleteConfirmation`]: a record is only
//! deleted when the confirm names the same id as the pending selection.

use thiserror::Error;
use tracing::{info, instrument};

use adopt_a_dog_core::{
    Breed, BreedError, ConfirmError, DeleteConfirmation, DogError, DogId, DogRecord, NewDog,
};

use crate::db::{DogStore, RepositoryError};
use crate::dog_api::{DogApiError, ImageProvider};

/// Errors raised by gallery operations.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// The breed input could not be normalized.
    #[error("{0}")]
    InvalidBreed(#[from] BreedError),

    /// The breed-scoped image lookup failed, e.g. an unknown breed.
    #[error("Failed to find an image for this breed: {0}")]
    Provider(#[from] DogApiError),

    /// The new record is missing a required field.
    #[error("Failed to add dog: {0}")]
    Record(#[from] DogError),

    /// The confirm did not match the pending selection.
    #[error("{0}")]
    Confirm(#[from] ConfirmError),

    /// The store failed.
    #[error("Dog store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Gallery operations over the store and image provider.
pub struct GalleryService<'a> {
    dogs: &'a dyn DogStore,
    images: &'a dyn ImageProvider,
}

impl<'a> GalleryService<'a> {
    /// Create a new gallery service.
    #[must_use]
    pub const fn new(dogs: &'a dyn DogStore, images: &'a dyn ImageProvider) -> Self {
        Self { dogs, images }
    }

    /// All records, ordered by breed ascending.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Store` if the store read fails.
    #[instrument(skip(self))]
    pub async fn list_dogs(&self) -> Result<Vec<DogRecord>, GalleryError> {
        Ok(self.dogs.list_dogs().await?)
    }

    /// Add a dog of the requested breed.
    ///
    /// The input is normalized into lookup form, the provider is asked for an
    /// image of that breed, and the record is stored with the normalized
    /// breed (not one re-derived from the returned URL).
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::InvalidBreed` for blank input (no provider
    /// call is made), `GalleryError::Provider` if the lookup fails (no record
    /// is inserted), or `GalleryError::Store` if the insert fails.
    #[instrument(skip(self))]
    pub async fn add_dog(&self, breed_input: &str) -> Result<DogRecord, GalleryError> {
        let breed = Breed::normalize(breed_input)?;
        let image_url = self.images.random_image_for_breed(&breed).await?;

        let record = self
            .dogs
            .insert_dog(NewDog::new(breed.into_inner(), image_url)?)
            .await?;
        info!(dog_id = %record.id, breed = %record.breed, "Dog added");

        Ok(record)
    }

    /// Delete a dog selected for deletion.
    ///
    /// The selection is cleared after a successful delete. A failed delete
    /// leaves it in place.
    ///
    /// # Errors
    ///
    /// Returns `GalleryError::Confirm` without a store call if `id` is not the
    /// pending selection, or `GalleryError::Store` if the delete fails.
    #[instrument(skip(self, confirmation))]
    pub async fn delete_dog(
        &self,
        confirmation: &mut DeleteConfirmation,
        id: DogId,
    ) -> Result<(), GalleryError> {
        let id = confirmation.confirm(id)?;
        self.dogs.delete_dog(id).await?;
        confirmation.cancel();
        info!(dog_id = %id, "Dog deleted");

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::testing::{FakeImage, FakeImageProvider, GOLDEN_URL, MemoryDogStore};

    const SHIBA_URL: &str = "https://images.dog.ceo/breeds/shiba/shiba-11.jpg";

    #[tokio::test]
    async fn test_list_orders_by_breed() {
        let dogs = MemoryDogStore::with_dogs(&[
            ("pug", "https://x/1.jpg"),
            ("akita", "https://x/2.jpg"),
            ("pug", "https://x/3.jpg"),
        ]);
        let images = FakeImageProvider::url(GOLDEN_URL);
        let gallery = GalleryService::new(&dogs, &images);

        let listed = gallery.list_dogs().await.unwrap();
        let order: Vec<_> = listed.iter().map(|d| d.image_url.as_str()).collect();

        assert_eq!(order, ["https://x/2.jpg", "https://x/1.jpg", "https://x/3.jpg"]);
    }

    #[tokio::test]
    async fn test_list_twice_is_identical() {
        let dogs = MemoryDogStore::with_dogs(&[("pug", "https://x/1.jpg"), ("akita", "https://x/2.jpg")]);
        let images = FakeImageProvider::url(GOLDEN_URL);
        let gallery = GalleryService::new(&dogs, &images);

        assert_eq!(gallery.list_dogs().await.unwrap(), gallery.list_dogs().await.unwrap());
    }

    #[tokio::test]
    async fn test_list_store_error() {
        let dogs = MemoryDogStore::new();
        dogs.fail_list();
        let images = FakeImageProvider::url(GOLDEN_URL);

        let err = GalleryService::new(&dogs, &images).list_dogs().await.unwrap_err();
        assert!(matches!(err, GalleryError::Store(_)));
    }

    #[tokio::test]
    async fn test_add_uses_normalized_breed() {
        let dogs = MemoryDogStore::new();
        let images = FakeImageProvider::url(SHIBA_URL);
        let gallery = GalleryService::new(&dogs, &images);

        let record = gallery.add_dog("Shiba Inu").await.unwrap();

        assert_eq!(images.breed_requests(), ["shiba-inu"]);
        assert_eq!(record.breed, "shiba-inu");
        assert_eq!(record.image_url, SHIBA_URL);
        assert!(!record.is_adopted);
        assert_eq!(dogs.records(), vec![record]);
    }

    #[tokio::test]
    async fn test_add_unknown_breed_inserts_nothing() {
        let dogs = MemoryDogStore::new();
        let images = FakeImageProvider::new(FakeImage::Status(404));
        let gallery = GalleryService::new(&dogs, &images);

        let err = gallery.add_dog("not a breed").await.unwrap_err();

        assert!(matches!(err, GalleryError::Provider(_)));
        assert_eq!(dogs.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_add_blank_breed_skips_provider() {
        let dogs = MemoryDogStore::new();
        let images = FakeImageProvider::url(SHIBA_URL);
        let gallery = GalleryService::new(&dogs, &images);

        let err = gallery.add_dog("   ").await.unwrap_err();

        assert!(matches!(err, GalleryError::InvalidBreed(BreedError::Empty)));
        assert!(images.breed_requests().is_empty());
        assert_eq!(dogs.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_add_url_syntax_in_breed_skips_provider() {
        let dogs = MemoryDogStore::new();
        let images = FakeImageProvider::url(SHIBA_URL);
        let gallery = GalleryService::new(&dogs, &images);

        for input in ["pug?x=1", "pug#frag", "pug%2fx", ".."] {
            let err = gallery.add_dog(input).await.unwrap_err();
            assert!(
                matches!(err, GalleryError::InvalidBreed(BreedError::InvalidCharacter)),
                "{input}"
            );
        }
        assert!(images.breed_requests().is_empty());
        assert_eq!(dogs.insert_calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_matching_selection() {
        let dogs = MemoryDogStore::with_dogs(&[("pug", "https://x/1.jpg"), ("akita", "https://x/2.jpg")]);
        let images = FakeImageProvider::url(GOLDEN_URL);
        let gallery = GalleryService::new(&dogs, &images);
        let records = dogs.records();
        let mut confirmation = DeleteConfirmation::default();

        // Absent selection
        let err = gallery
            .delete_dog(&mut confirmation, records[0].id)
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::Confirm(ConfirmError::NothingPending)));

        // Mismatched selection
        confirmation.select(records[1].id);
        let err = gallery
            .delete_dog(&mut confirmation, records[0].id)
            .await
            .unwrap_err();
        assert!(matches!(err, GalleryError::Confirm(ConfirmError::Mismatch { .. })));

        assert_eq!(dogs.delete_calls(), 0);
        assert_eq!(dogs.records().len(), 2);
        assert_eq!(confirmation.pending(), Some(records[1].id));
    }

    #[tokio::test]
    async fn test_delete_after_select_clears_selection() {
        let dogs = MemoryDogStore::with_dogs(&[("pug", "https://x/1.jpg"), ("akita", "https://x/2.jpg")]);
        let images = FakeImageProvider::url(GOLDEN_URL);
        let gallery = GalleryService::new(&dogs, &images);
        let target = dogs.records()[0].id;
        let mut confirmation = DeleteConfirmation::default();

        confirmation.select(target);
        gallery.delete_dog(&mut confirmation, target).await.unwrap();

        assert_eq!(confirmation.pending(), None);
        let remaining = gallery.list_dogs().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(remaining.iter().all(|d| d.id != target));
    }

    #[tokio::test]
    async fn test_delete_missing_record_keeps_selection() {
        let dogs = MemoryDogStore::new();
        let images = FakeImageProvider::url(GOLDEN_URL);
        let gallery = GalleryService::new(&dogs, &images);
        let id = DogId::new(Uuid::new_v4());
        let mut confirmation = DeleteConfirmation::default();
        confirmation.select(id);

        let err = gallery.delete_dog(&mut confirmation, id).await.unwrap_err();

        assert!(matches!(err, GalleryError::Store(RepositoryError::NotFound)));
        assert_eq!(confirmation.pending(), Some(id));
    }
}
