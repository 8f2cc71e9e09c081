//! Dog Fetch Widget fragment (HTMX).
//!
//! Pages render the widget as a spinner that requests this fragment on load.
//! Each request is one activation.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use adopt_a_dog_core::{DogRecord, LoadState};

use crate::filters;
use crate::routes::views::{GalleryView, load_gallery};
use crate::services::fetch_dog;
use crate::state::AppState;

/// Query parameters for the widget fragment.
#[derive(Debug, Default, Deserialize)]
pub struct WidgetQuery {
    /// Also render the read-only gallery.
    #[serde(default)]
    pub show_all: bool,
}

/// Widget fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/fetch_dog.html")]
pub struct FetchDogTemplate {
    pub dog: LoadState<DogRecord>,
    pub gallery: Option<GalleryView>,
}

/// Activate the widget.
#[instrument(skip(state))]
pub async fn fetch_dog(
    State(state): State<AppState>,
    Query(query): Query<WidgetQuery>,
) -> impl IntoResponse {
    let activation = fetch_dog::mount(Arc::clone(state.images()), Arc::clone(state.dogs()));

    let (dog, gallery) = if query.show_all {
        let (dog, dogs) = tokio::join!(activation, load_gallery(&state));
        (dog, Some(GalleryView::read_only(dogs)))
    } else {
        (activation.await, None)
    };

    FetchDogTemplate { dog, gallery }
}
