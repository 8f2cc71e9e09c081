//! Admin manage view.
//!
//! Every route here runs the Access Gate. The pending delete selection lives
//! in the session, so select, confirm, and cancel are separate requests.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{instrument, warn};

use adopt_a_dog_core::{DeleteConfirmation, DogId, LoadState};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::session_keys;
use crate::routes::views::{GalleryView, ReturnTo, load_gallery};
use crate::services::gallery::{GalleryError, GalleryService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Query parameters for the manage view.
#[derive(Debug, Default, Deserialize)]
pub struct AdminQuery {
    /// Show the add form.
    #[serde(default)]
    pub adding: bool,
}

/// Add dog form data.
#[derive(Debug, Deserialize)]
pub struct AddDogForm {
    pub dog_breed: String,
    #[serde(default)]
    pub next: ReturnTo,
}

/// Hidden return target on delete forms.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    #[serde(default)]
    pub next: ReturnTo,
}

// =============================================================================
// Templates
// =============================================================================

/// Manage view template.
#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub signed_in: bool,
    pub adding: bool,
    pub gallery: GalleryView,
}

impl AdminTemplate {
    fn new(adding: bool, gallery: GalleryView) -> Self {
        Self {
            signed_in: true,
            adding,
            gallery,
        }
    }

    /// The manage view replaced by an error panel.
    fn failed(message: String) -> Self {
        Self::new(
            false,
            GalleryView::manage(
                LoadState::Error(message),
                DeleteConfirmation::default(),
                ReturnTo::Admin,
            ),
        )
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the pending delete selection.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn load_confirmation(session: &Session) -> Result<DeleteConfirmation> {
    Ok(session
        .get::<DeleteConfirmation>(session_keys::PENDING_DELETE)
        .await?
        .unwrap_or_default())
}

async fn save_confirmation(session: &Session, confirmation: DeleteConfirmation) -> Result<()> {
    session
        .insert(session_keys::PENDING_DELETE, confirmation)
        .await?;
    Ok(())
}

// =============================================================================
// Routes
// =============================================================================

/// Display the manage view.
#[instrument(skip_all)]
pub async fn manage(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AdminQuery>,
) -> Result<impl IntoResponse> {
    let confirmation = load_confirmation(&session).await?;
    let dogs = load_gallery(&state).await;

    Ok(AdminTemplate::new(
        query.adding,
        GalleryView::manage(dogs, confirmation, ReturnTo::Admin),
    ))
}

/// Add a dog of the submitted breed.
#[instrument(skip_all, fields(breed = %form.dog_breed))]
pub async fn add_dog(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<AddDogForm>,
) -> Response {
    let gallery = GalleryService::new(state.dogs().as_ref(), state.images().as_ref());

    match gallery.add_dog(&form.dog_breed).await {
        Ok(record) => {
            add_breadcrumb("admin", "Added dog", Some(&[("breed", record.breed.as_str())]));
            Redirect::to(form.next.path()).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Error adding dog");
            AdminTemplate::failed(e.to_string()).into_response()
        }
    }
}

/// Mark a dog for deletion.
#[instrument(skip(session, form))]
pub async fn select_delete(
    RequireAdmin(_): RequireAdmin,
    session: Session,
    Path(id): Path<DogId>,
    Form(form): Form<ReturnForm>,
) -> Result<Redirect> {
    let mut confirmation = load_confirmation(&session).await?;
    confirmation.select(id);
    save_confirmation(&session, confirmation).await?;

    Ok(Redirect::to(form.next.path()))
}

/// Clear the pending selection. No store call is made.
#[instrument(skip_all)]
pub async fn cancel_delete(
    RequireAdmin(_): RequireAdmin,
    session: Session,
    Form(form): Form<ReturnForm>,
) -> Result<Redirect> {
    let mut confirmation = load_confirmation(&session).await?;
    confirmation.cancel();
    save_confirmation(&session, confirmation).await?;

    Ok(Redirect::to(form.next.path()))
}

/// Delete the dog pending confirmation.
///
/// A confirm that does not name the pending dog is rejected with 400 and
/// the store is not touched.
#[instrument(skip(state, session, form))]
pub async fn confirm_delete(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<DogId>,
    Form(form): Form<ReturnForm>,
) -> Result<Response> {
    let mut confirmation = load_confirmation(&session).await?;
    let gallery = GalleryService::new(state.dogs().as_ref(), state.images().as_ref());

    match gallery.delete_dog(&mut confirmation, id).await {
        Ok(()) => {
            save_confirmation(&session, confirmation).await?;
            add_breadcrumb("admin", "Deleted dog", Some(&[("dog_id", id.to_string().as_str())]));
            Ok(Redirect::to(form.next.path()).into_response())
        }
        Err(GalleryError::Confirm(e)) => Err(AppError::BadRequest(e.to_string())),
        Err(e) => {
            warn!(error = %e, "Error deleting dog");
            Ok(AdminTemplate::failed(e.to_string()).into_response())
        }
    }
}
