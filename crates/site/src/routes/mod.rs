//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Public home (widget + read-only gallery)
//! GET  /health                        - Liveness
//! GET  /health/ready                  - Readiness (dog store ping)
//!
//! # Widgets (HTMX fragments)
//! GET  /widgets/fetch-dog             - Fetch a random dog and record it
//!                                       (`?show_all=true` adds the gallery)
//!
//! # Signed in
//! GET  /protected                     - Role-aware home
//!
//! # Admin (Access Gate)
//! GET  /protected/admin               - Manage view (`?adding=true` opens the form)
//! POST /protected/admin/dogs          - Add a dog by breed
//! POST /protected/admin/dogs/cancel   - Clear the pending delete
//! POST /protected/admin/dogs/{id}/delete  - Mark a dog for deletion
//! POST /protected/admin/dogs/{id}/confirm - Delete the marked dog
//!
//! # Auth
//! GET  /sign-in                       - Sign-in page
//! POST /sign-in                       - Sign-in action
//! POST /sign-out                      - Sign-out action
//! ```

pub mod admin;
pub mod auth;
pub mod health;
pub mod home;
pub mod protected;
pub mod views;
pub mod widgets;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::manage))
        .route("/dogs", post(admin::add_dog))
        .route("/dogs/cancel", post(admin::cancel_delete))
        .route("/dogs/{id}/delete", post(admin::select_delete))
        .route("/dogs/{id}/confirm", post(admin::confirm_delete))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/widgets/fetch-dog", get(widgets::fetch_dog))
        .route("/protected", get(protected::protected_home))
        .nest("/protected/admin", admin_routes())
        .route("/sign-in", get(auth::sign_in_page).post(auth::sign_in))
        .route("/sign-out", post(auth::sign_out))
}
