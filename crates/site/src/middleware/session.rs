//! Session middleware configuration.
//!
//! Production sessions live in `PostgreSQL` via tower-sessions; tests use
//! the in-memory store. Either way the layer is configured the same.

use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};

use crate::config::SiteConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "adopt_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer over a session store.
///
/// Cookies are marked `Secure` when the public base URL is HTTPS.
#[must_use]
pub fn create_session_layer<S: SessionStore + Clone>(
    store: S,
    config: &SiteConfig,
) -> SessionManagerLayer<S> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
