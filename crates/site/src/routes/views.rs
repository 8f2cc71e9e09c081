//! View models shared by several pages.

use adopt_a_dog_core::{DeleteConfirmation, DogId, DogRecord, LoadState};

use crate::services::gallery::GalleryService;
use crate::state::AppState;

/// Fragment endpoint for the Dog Fetch Widget.
pub const FETCH_DOG_WIDGET: &str = "/widgets/fetch-dog";

/// Fragment endpoint for the Dog Fetch Widget with the read-only gallery.
pub const FETCH_DOG_WIDGET_SHOW_ALL: &str = "/widgets/fetch-dog?show_all=true";

/// Where an admin action returns to once it succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnTo {
    /// The dedicated manage view.
    #[default]
    Admin,
    /// The role-aware protected home.
    Protected,
}

impl ReturnTo {
    /// Path to redirect to.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Admin => "/protected/admin",
            Self::Protected => "/protected",
        }
    }

    /// Form value that round-trips through `Deserialize`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Protected => "protected",
        }
    }
}

/// One card in the gallery.
pub struct DogCard {
    pub id: DogId,
    pub breed: String,
    pub image_url: String,
    /// Awaiting delete confirmation.
    pub pending: bool,
}

/// The dog card grid.
///
/// Read-only for visitors; with manage controls for admins, where each card
/// offers "Delete" or, while pending, "Confirm" and "Cancel".
pub struct GalleryView {
    /// The cards, loaded independently of anything else on the page.
    pub dogs: LoadState<Vec<DogCard>>,
    /// Whether cards carry delete controls.
    pub manage: bool,
    /// Where manage forms return to.
    pub return_to: ReturnTo,
}

impl GalleryView {
    /// A read-only gallery.
    #[must_use]
    pub fn read_only(dogs: LoadState<Vec<DogRecord>>) -> Self {
        Self::build(dogs, false, DeleteConfirmation::default(), ReturnTo::default())
    }

    /// A gallery with manage controls.
    #[must_use]
    pub fn manage(
        dogs: LoadState<Vec<DogRecord>>,
        confirmation: DeleteConfirmation,
        return_to: ReturnTo,
    ) -> Self {
        Self::build(dogs, true, confirmation, return_to)
    }

    fn build(
        dogs: LoadState<Vec<DogRecord>>,
        manage: bool,
        confirmation: DeleteConfirmation,
        return_to: ReturnTo,
    ) -> Self {
        let dogs = dogs.map(|records| {
            records
                .into_iter()
                .map(|record| DogCard {
                    pending: manage && confirmation.is_pending(record.id),
                    id: record.id,
                    breed: record.breed,
                    image_url: record.image_url,
                })
                .collect()
        });

        Self {
            dogs,
            manage,
            return_to,
        }
    }
}

/// Load the record list into its view state.
pub async fn load_gallery(state: &AppState) -> LoadState<Vec<DogRecord>> {
    let result = GalleryService::new(state.dogs().as_ref(), state.images().as_ref())
        .list_dogs()
        .await;

    if let Err(e) = &result {
        tracing::error!(error = %e, "Error fetching dogs");
    }

    LoadState::from_result(result)
}
