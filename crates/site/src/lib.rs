//! Adopt a Dog site library.
//!
//! This crate provides the site as a library, allowing the router to be
//! tested against in-memory fakes and reused by the binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod dog_api;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore;

use state::AppState;

/// Build the site router over a session store.
///
/// Static files and the Sentry layers are added by the binary.
pub fn app<S>(state: AppState, session_store: S) -> Router
where
    S: SessionStore + Clone,
{
    let session_layer = middleware::create_session_layer(session_store, state.config());

    routes::routes()
        .layer(axum_middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(session_layer)
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            },
        ))
        .with_state(state)
}
