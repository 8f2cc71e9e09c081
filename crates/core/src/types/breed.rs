//! Dog breed labels.
//!
//! Breeds show up in two forms:
//!
//! - Derived from an image URL returned by the image provider
//!   (`.../breeds/retriever-golden/n02.jpg` → `"retriever golden"`),
//!   see [`breed_from_image_url`].
//! - Typed by an admin and normalized into the provider's lookup form
//!   (`"Shiba Inu"` → `"shiba-inu"`), see [`Breed::normalize`].

use std::sync::LazyLock;

use core::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Label recorded when no breed segment can be found in an image URL.
pub const UNKNOWN_BREED: &str = "unknown";

/// Matches the path segment immediately following `breeds/`.
static BREED_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Pattern is a compile-time constant
    Regex::new(r"breeds/([^/]+)").unwrap()
});

/// Matches runs of whitespace in admin input.
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Pattern is a compile-time constant
    Regex::new(r"\s+").unwrap()
});

/// Extract a human-readable breed label from an image URL.
///
/// Takes the segment after `breeds/` and replaces its first hyphen with a
/// space. Only the first hyphen is replaced, so a segment such as
/// `"a-b-c"` becomes `"a b-c"`. Returns [`UNKNOWN_BREED`] when the URL has no
/// breed segment.
///
/// ```
/// use adopt_a_dog_core::breed_from_image_url;
///
/// assert_eq!(
///     breed_from_image_url("https://images.dog.ceo/breeds/retriever-golden/n02.jpg"),
///     "retriever golden"
/// );
/// assert_eq!(breed_from_image_url("https://example.com/dog.jpg"), "unknown");
/// ```
#[must_use]
pub fn breed_from_image_url(url: &str) -> String {
    BREED_SEGMENT
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map_or_else(
            || UNKNOWN_BREED.to_string(),
            |segment| segment.as_str().replacen('-', " ", 1),
        )
}

/// Errors that can occur when normalizing breed input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BreedError {
    /// The input is empty or only whitespace.
    #[error("dog breed is required")]
    Empty,
    /// The input contains something other than letters, digits, spaces and
    /// hyphens, and cannot be used as a lookup path segment.
    #[error("dog breed may only contain letters, digits, spaces and hyphens")]
    InvalidCharacter,
}

/// A breed in the image provider's lookup form.
///
/// Lowercase with whitespace runs collapsed to single hyphens. This value is
/// both the provider path segment and the label stored on records created
/// from the admin form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Breed(String);

impl Breed {
    /// Normalize free-form admin input into lookup form.
    ///
    /// Leading and trailing whitespace is trimmed before the internal
    /// whitespace runs are collapsed.
    ///
    /// ```
    /// use adopt_a_dog_core::Breed;
    ///
    /// assert_eq!(Breed::normalize("Shiba Inu").unwrap().as_str(), "shiba-inu");
    /// assert!(Breed::normalize("   ").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BreedError::Empty`] for blank input and
    /// [`BreedError::InvalidCharacter`] if anything but ASCII letters,
    /// digits, whitespace and hyphens remains.
    pub fn normalize(input: &str) -> Result<Self, BreedError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(BreedError::Empty);
        }

        let lowered = trimmed.to_lowercase();
        let normalized = WHITESPACE_RUN.replace_all(&lowered, "-");
        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(BreedError::InvalidCharacter);
        }

        Ok(Self(normalized.into_owned()))
    }

    /// Get the breed as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the breed, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Breed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Breed {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
