//! Dog Fetch Widget.
//!
//! One activation performs one unscoped image fetch, derives the breed from
//! the returned URL, and records the dog. The two calls are strictly
//! sequenced and not transactional: a failed insert leaves nothing behind
//! and is reported as a failure of the whole activation.
//!
//! An activation runs as its own task. The request that mounted the widget
//! holds a drop guard on the activation's [`CancellationToken`]; if the
//! request goes away the token fires, the in-flight call is left to finish,
//! and its result is discarded without touching the store or the view.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

use adopt_a_dog_core::{DogError, DogRecord, LoadState, NewDog, breed_from_image_url};

use crate::db::{DogStore, RepositoryError};
use crate::dog_api::{DogApiError, ImageProvider};

/// Errors raised by a widget activation.
#[derive(Debug, Error)]
pub enum FetchDogError {
    /// The image provider was unreachable or answered non-2xx.
    #[error("Failed to fetch a dog: {0}")]
    Network(DogApiError),

    /// The image provider answered with an unexpected payload.
    #[error("{0}")]
    Malformed(DogApiError),

    /// The fetched dog could not be recorded.
    #[error("Failed to upload dog: {0}")]
    Store(#[from] RepositoryError),

    /// The fetched dog is missing a required field.
    #[error("Failed to upload dog: {0}")]
    Record(#[from] DogError),

    /// The widget went away before the activation finished.
    #[error("widget was unmounted")]
    Cancelled,
}

impl From<DogApiError> for FetchDogError {
    fn from(err: DogApiError) -> Self {
        if err.is_network() {
            Self::Network(err)
        } else {
            Self::Malformed(err)
        }
    }
}

/// Fetch one random image and record it.
///
/// The insert is only issued after the fetch succeeds, and is skipped if
/// `cancel` fired while the fetch was suspended.
///
/// # Errors
///
/// Returns the provider, record, or store failure, or
/// [`FetchDogError::Cancelled`] if the widget went away before the insert.
#[instrument(skip_all)]
pub async fn fetch_and_record(
    images: &dyn ImageProvider,
    dogs: &dyn DogStore,
    cancel: &CancellationToken,
) -> Result<DogRecord, FetchDogError> {
    info!("Fetching dog image");
    let image_url = images.random_image().await?;

    if cancel.is_cancelled() {
        return Err(FetchDogError::Cancelled);
    }

    let breed = breed_from_image_url(&image_url);
    debug!(%breed, %image_url, "Derived breed");

    let record = dogs.insert_dog(NewDog::new(breed, image_url)?).await?;
    info!(dog_id = %record.id, breed = %record.breed, "Dog recorded");

    Ok(record)
}

/// Run one activation to its view state.
///
/// Returns `None` when `cancel` fired before the activation resolved; the
/// view must not be updated in that case.
pub async fn activate(
    images: &dyn ImageProvider,
    dogs: &dyn DogStore,
    cancel: &CancellationToken,
) -> Option<LoadState<DogRecord>> {
    let result = fetch_and_record(images, dogs, cancel).await;

    if cancel.is_cancelled() {
        debug!("Widget unmounted, discarding activation result");
        return None;
    }

    if let Err(e) = &result {
        error!(error = %e, "Error in fetch dog");
    }

    Some(LoadState::from_result(result))
}

/// Spawn an activation as its own task.
pub fn spawn_activation(
    images: Arc<dyn ImageProvider>,
    dogs: Arc<dyn DogStore>,
    cancel: CancellationToken,
) -> JoinHandle<Option<LoadState<DogRecord>>> {
    tokio::spawn(async move { activate(images.as_ref(), dogs.as_ref(), &cancel).await })
}

/// Mount the widget: spawn an activation and wait for its view state.
///
/// Dropping the returned future before it resolves unmounts the widget.
pub async fn mount(
    images: Arc<dyn ImageProvider>,
    dogs: Arc<dyn DogStore>,
) -> LoadState<DogRecord> {
    let cancel = CancellationToken::new();
    let _unmount = cancel.clone().drop_guard();

    match spawn_activation(images, dogs, cancel).await {
        Ok(Some(state)) => state,
        // The guard is still held, so nothing else can cancel the token
        Ok(None) => LoadState::Loading,
        Err(e) => {
            error!(error = %e, "Fetch dog task failed");
            LoadState::Error("An unexpected error occurred".to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::{FakeImage, FakeImageProvider, GOLDEN_URL, MemoryDogStore};

    #[tokio::test]
    async fn test_records_dog_from_image_url() {
        let images = FakeImageProvider::url(GOLDEN_URL);
        let dogs = MemoryDogStore::new();
        let cancel = CancellationToken::new();

        let record = fetch_and_record(&images, &dogs, &cancel).await.unwrap();

        assert_eq!(record.breed, "retriever golden");
        assert_eq!(record.image_url, GOLDEN_URL);
        assert!(!record.is_adopted);
        assert_eq!(dogs.records(), vec![record]);
    }

    #[tokio::test]
    async fn test_unknown_breed_when_url_has_no_segment() {
        let images = FakeImageProvider::url("https://images.dog.ceo/n02.jpg");
        let dogs = MemoryDogStore::new();

        let record = fetch_and_record(&images, &dogs, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(record.breed, "unknown");
    }

    #[tokio::test]
    async fn test_provider_failures_never_insert() {
        for answer in [
            FakeImage::Status(500),
            FakeImage::Status(404),
            FakeImage::Malformed("Breed not found".to_string()),
        ] {
            let images = FakeImageProvider::new(answer);
            let dogs = MemoryDogStore::new();

            let state = activate(&images, &dogs, &CancellationToken::new())
                .await
                .unwrap();

            assert!(matches!(state, LoadState::Error(_)));
            assert_eq!(dogs.insert_calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_failures_have_distinct_messages() {
        let dogs = MemoryDogStore::new();
        let cancel = CancellationToken::new();

        let network = fetch_and_record(&FakeImageProvider::new(FakeImage::Status(503)), &dogs, &cancel)
            .await
            .unwrap_err();
        let malformed = fetch_and_record(
            &FakeImageProvider::new(FakeImage::Malformed("bad".to_string())),
            &dogs,
            &cancel,
        )
        .await
        .unwrap_err();
        dogs.fail_insert();
        let store = fetch_and_record(&FakeImageProvider::url(GOLDEN_URL), &dogs, &cancel)
            .await
            .unwrap_err();

        assert!(matches!(network, FetchDogError::Network(_)));
        assert!(matches!(malformed, FetchDogError::Malformed(_)));
        assert!(matches!(store, FetchDogError::Store(_)));
        assert_ne!(network.to_string(), malformed.to_string());
        assert_ne!(malformed.to_string(), store.to_string());
        assert!(store.to_string().starts_with("Failed to upload dog"));
    }

    #[tokio::test]
    async fn test_insert_failure_is_error_state_and_leaves_no_record() {
        let images = FakeImageProvider::url(GOLDEN_URL);
        let dogs = MemoryDogStore::new();
        dogs.fail_insert();

        let state = activate(&images, &dogs, &CancellationToken::new())
            .await
            .unwrap();

        assert!(matches!(state, LoadState::Error(_)));
        assert_eq!(images.random_calls(), 1);
        assert!(dogs.records().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_activation_is_discarded() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let images = Arc::new(FakeImageProvider::gated(
            FakeImage::Url(GOLDEN_URL.to_string()),
            Arc::clone(&gate),
        ));
        let dogs = Arc::new(MemoryDogStore::new());
        let cancel = CancellationToken::new();

        let handle = spawn_activation(images.clone(), dogs.clone(), cancel.clone());

        // Unmount while the fetch is suspended, then let it resolve
        cancel.cancel();
        gate.notify_one();

        assert!(handle.await.unwrap().is_none());
        assert_eq!(images.random_calls(), 1);
        assert_eq!(dogs.insert_calls(), 0);
        assert!(dogs.records().is_empty());
    }

    #[tokio::test]
    async fn test_dropping_mount_discards_in_flight_fetch() {
        let gate = Arc::new(tokio::sync::Notify::new());
        let images = Arc::new(FakeImageProvider::gated(
            FakeImage::Url(GOLDEN_URL.to_string()),
            Arc::clone(&gate),
        ));
        let dogs = Arc::new(MemoryDogStore::new());

        let mut mounted = Box::pin(mount(images.clone(), dogs.clone()));

        // Drive the mount until the spawned activation is waiting on the provider
        while images.random_calls() == 0 {
            tokio::select! {
                _ = &mut mounted => panic!("mount resolved while the provider was gated"),
                () = tokio::task::yield_now() => {}
            }
        }

        drop(mounted);
        gate.notify_one();

        // Give the activation task time to finish
        for _ in 0..10 {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        assert_eq!(images.random_calls(), 1);
        assert_eq!(dogs.insert_calls(), 0);
        assert!(dogs.records().is_empty());
    }

    #[tokio::test]
    async fn test_mount_resolves_ready() {
        let images: Arc<dyn ImageProvider> = Arc::new(FakeImageProvider::url(GOLDEN_URL));
        let dogs = Arc::new(MemoryDogStore::new());

        let state = mount(images, dogs.clone()).await;

        let LoadState::Ready(record) = state else {
            panic!("expected a ready dog");
        };
        assert_eq!(record.breed, "retriever golden");
        assert_eq!(dogs.records().len(), 1);
    }
}
