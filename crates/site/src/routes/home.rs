//! Public home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalUser;
use crate::routes::views::FETCH_DOG_WIDGET_SHOW_ALL;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub signed_in: bool,
    pub widget_url: &'static str,
}

/// Display the home page: a random dog and the read-only gallery.
pub async fn home(OptionalUser(user): OptionalUser) -> impl IntoResponse {
    HomeTemplate {
        signed_in: user.is_some(),
        widget_url: FETCH_DOG_WIDGET_SHOW_ALL,
    }
}
