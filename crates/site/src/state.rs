//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::db::DogStore;
use crate::dog_api::ImageProvider;
use crate::services::auth::AuthProvider;

/// Application state shared across all handlers.
///
/// The store and the two HTTP clients are injected handles, so handlers and
/// tests see the same surface whether they run against Postgres and the real
/// services or against in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    dogs: Arc<dyn DogStore>,
    images: Arc<dyn ImageProvider>,
    auth: Arc<dyn AuthProvider>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        config: SiteConfig,
        dogs: Arc<dyn DogStore>,
        images: Arc<dyn ImageProvider>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                dogs,
                images,
                auth,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get the Dog Record Store.
    #[must_use]
    pub fn dogs(&self) -> &Arc<dyn DogStore> {
        &self.inner.dogs
    }

    /// Get the Image Provider client.
    #[must_use]
    pub fn images(&self) -> &Arc<dyn ImageProvider> {
        &self.inner.images
    }

    /// Get the Authentication Service client.
    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthProvider> {
        &self.inner.auth
    }
}
