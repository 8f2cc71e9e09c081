//! Signed-in home page.
//!
//! Role-aware: admins get the add widget and the manage view, everyone else
//! gets the read-only gallery.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use adopt_a_dog_core::LoadState;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireUser;
use crate::routes::admin::load_confirmation;
use crate::routes::views::{
    FETCH_DOG_WIDGET, FETCH_DOG_WIDGET_SHOW_ALL, GalleryView, ReturnTo, load_gallery,
};
use crate::state::AppState;

/// Protected home template.
#[derive(Template, WebTemplate)]
#[template(path = "protected.html")]
pub struct ProtectedTemplate {
    pub signed_in: bool,
    pub is_admin: bool,
    pub widget_url: &'static str,
    /// Manage view, admins only.
    pub gallery: Option<GalleryView>,
}

/// Display the protected home page.
#[instrument(skip_all)]
pub async fn protected_home(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    if !user.role.is_admin() {
        return Ok(ProtectedTemplate {
            signed_in: true,
            is_admin: false,
            widget_url: FETCH_DOG_WIDGET_SHOW_ALL,
            gallery: None,
        });
    }

    let confirmation = load_confirmation(&session).await?;
    let dogs = load_gallery(&state).await;

    Ok(ProtectedTemplate {
        signed_in: true,
        is_admin: true,
        widget_url: FETCH_DOG_WIDGET,
        gallery: Some(GalleryView::manage(dogs, confirmation, ReturnTo::Protected)),
    })
}
