//! Random dog image API client.
//!
//! The provider (<https://dog.ceo>) exposes two endpoints used here:
//!
//! ```text
//! GET /breeds/image/random          -> {"message": "<image url>", "status": "success"}
//! GET /breed/{breed}/images/random  -> {"message": "<image url>", "status": "success"}
//! ```
//!
//! Unknown breeds come back as a non-2xx response with `"status": "error"`.
//! There is no retry, backoff, or caching: a failed call is terminal for the
//! operation that made it.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use adopt_a_dog_core::Breed;

use url::Url;

use crate::config::DogApiConfig;

/// Errors that can occur when calling the image provider.
#[derive(Debug, Error)]
pub enum DogApiError {
    /// Provider unreachable or the request failed in transit.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Provider answered 2xx with an unexpected payload.
    #[error("Invalid API response: {0}")]
    Malformed(String),

    /// The configured base URL cannot take path segments.
    #[error("Invalid image provider URL: {0}")]
    InvalidBaseUrl(String),
}

impl DogApiError {
    /// Whether this is a network-level failure (as opposed to a bad payload).
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Status(_))
    }
}

/// Payload status reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

/// Raw response body of both random-image endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomImageResponse {
    /// Image URL on success, an error description otherwise.
    pub message: String,
    pub status: ApiStatus,
}

impl RandomImageResponse {
    /// Extract the image URL from a successful payload.
    ///
    /// # Errors
    ///
    /// Returns `DogApiError::Malformed` if the status is not `success` or the
    /// message is empty.
    pub fn into_image_url(self) -> Result<String, DogApiError> {
        match self.status {
            ApiStatus::Success if !self.message.trim().is_empty() => Ok(self.message),
            ApiStatus::Success => Err(DogApiError::Malformed("empty image URL".to_string())),
            ApiStatus::Error => Err(DogApiError::Malformed(self.message)),
        }
    }
}

/// Source of random dog image URLs.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Image URL for any random breed.
    async fn random_image(&self) -> Result<String, DogApiError>;

    /// Image URL for a specific breed, in lookup form.
    async fn random_image_for_breed(&self, breed: &Breed) -> Result<String, DogApiError>;
}

// =============================================================================
// DogCeoClient
// =============================================================================

/// Client for the dog.ceo API.
#[derive(Clone)]
pub struct DogCeoClient {
    client: reqwest::Client,
    base_url: Url,
}

impl DogCeoClient {
    /// Create a new client.
    #[must_use]
    pub fn new(config: &DogApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn endpoint<'s>(&self, segments: impl IntoIterator<Item = &'s str>) -> Result<Url, DogApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DogApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Endpoint for an unscoped random image.
    fn random_url(&self) -> Result<Url, DogApiError> {
        self.endpoint(["breeds", "image", "random"])
    }

    /// Endpoint for a breed-scoped random image.
    fn breed_url(&self, breed: &Breed) -> Result<Url, DogApiError> {
        self.endpoint(["breed", breed.as_str(), "images", "random"])
    }

    /// GET an endpoint and decode its payload.
    async fn fetch(&self, url: Url) -> Result<String, DogApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(DogApiError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let payload: RandomImageResponse = serde_json::from_str(&body)
            .map_err(|e| DogApiError::Malformed(format!("failed to decode payload: {e}")))?;
        debug!(status = ?payload.status, message = %payload.message, "Image provider response");

        payload.into_image_url()
    }
}

#[async_trait]
impl ImageProvider for DogCeoClient {
    #[instrument(skip(self))]
    async fn random_image(&self) -> Result<String, DogApiError> {
        self.fetch(self.random_url()?).await
    }

    #[instrument(skip(self), fields(breed = %breed))]
    async fn random_image_for_breed(&self, breed: &Breed) -> Result<String, DogApiError> {
        self.fetch(self.breed_url(breed)?).await
    }
}
