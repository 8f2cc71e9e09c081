//! Dog record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::DogId;

/// Errors raised when a record is missing a required field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DogError {
    /// The breed label is empty.
    #[error("dog breed is required")]
    MissingBreed,
    /// The image URL is empty.
    #[error("image URL is required")]
    MissingImageUrl,
}

/// A stored dog record.
///
/// Records are created and deleted but never updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DogRecord {
    /// Store-assigned ID, unique and immutable.
    pub id: DogId,
    /// Lowercase human-readable breed label.
    pub breed: String,
    /// Absolute URL of an externally hosted image.
    pub image_url: String,
    /// Adoption status. Always `false` for records created by this site.
    pub is_adopted: bool,
    /// When the store accepted the record.
    pub created_at: DateTime<Utc>,
}

/// A record that has not been stored yet.
///
/// Construct with [`NewDog::new`], which enforces the required fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDog {
    breed: String,
    image_url: String,
    is_adopted: bool,
}

impl NewDog {
    /// Create a new, not-yet-adopted dog.
    ///
    /// # Errors
    ///
    /// Returns [`DogError`] if either field is empty.
    pub fn new(breed: impl Into<String>, image_url: impl Into<String>) -> Result<Self, DogError> {
        let breed = breed.into();
        let image_url = image_url.into();

        if breed.trim().is_empty() {
            return Err(DogError::MissingBreed);
        }
        if image_url.trim().is_empty() {
            return Err(DogError::MissingImageUrl);
        }

        Ok(Self {
            breed,
            image_url,
            is_adopted: false,
        })
    }

    /// Breed label to store.
    #[must_use]
    pub fn breed(&self) -> &str {
        &self.breed
    }

    /// Image URL to store.
    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Adoption status to store.
    #[must_use]
    pub const fn is_adopted(&self) -> bool {
        self.is_adopted
    }

    /// Attach the store-assigned identity, producing a [`DogRecord`].
    #[must_use]
    pub fn into_record(self, id: DogId, created_at: DateTime<Utc>) -> DogRecord {
        DogRecord {
            id,
            breed: self.breed,
            image_url: self.image_url,
            is_adopted: self.is_adopted,
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dog_defaults_to_not_adopted() {
        let dog = NewDog::new("retriever golden", "https://images.dog.ceo/breeds/x/1.jpg").unwrap();
        assert!(!dog.is_adopted());
        assert_eq!(dog.breed(), "retriever golden");
    }

    #[test]
    fn test_new_dog_requires_breed() {
        assert_eq!(
            NewDog::new("  ", "https://images.dog.ceo/1.jpg"),
            Err(DogError::MissingBreed)
        );
    }

    #[test]
    fn test_new_dog_requires_image_url() {
        assert_eq!(NewDog::new("pug", ""), Err(DogError::MissingImageUrl));
    }

    #[test]
    fn test_into_record_keeps_fields() {
        let id = DogId::new(uuid::Uuid::new_v4());
        let now = Utc::now();
        let record = NewDog::new("pug", "https://img/1.jpg")
            .unwrap()
            .into_record(id, now);

        assert_eq!(record.id, id);
        assert_eq!(record.breed, "pug");
        assert_eq!(record.image_url, "https://img/1.jpg");
        assert!(!record.is_adopted);
        assert_eq!(record.created_at, now);
    }
}
