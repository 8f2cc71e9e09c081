//! Sign-in and sign-out.
//!
//! Credentials are checked by the hosted authentication service. On success
//! only its access token is kept in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{error, info, instrument, warn};

use secrecy::ExposeSecret;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalUser, clear_session, set_access_token};
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Where a successful sign-in lands.
const AFTER_SIGN_IN_PATH: &str = "/protected";

/// Sign-in form data.
#[derive(Debug, Deserialize)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Sign-in page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/sign_in.html")]
pub struct SignInTemplate {
    pub signed_in: bool,
    pub error: Option<&'static str>,
}

/// Human-readable message for a sign-in error code.
fn error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Invalid email or password.",
        "missing" => "Email and password are required.",
        "session" => "Could not start your session. Please try again.",
        _ => "Sign-in is unavailable right now. Please try again later.",
    }
}

/// Display the sign-in page.
pub async fn sign_in_page(
    OptionalUser(user): OptionalUser,
    Query(query): Query<MessageQuery>,
) -> impl IntoResponse {
    SignInTemplate {
        signed_in: user.is_some(),
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle sign-in form submission.
#[instrument(skip_all)]
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignInForm>,
) -> Response {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Redirect::to("/sign-in?error=missing").into_response();
    }

    match state.auth().sign_in_with_password(email, &form.password).await {
        Ok(auth) => {
            if let Err(e) = set_access_token(&session, auth.access_token.expose_secret()).await {
                error!("Failed to set session: {}", e);
                return Redirect::to("/sign-in?error=session").into_response();
            }

            set_sentry_user(&auth.user.id, auth.user.email.as_deref());
            info!(user_id = %auth.user.id, "Signed in");
            Redirect::to(AFTER_SIGN_IN_PATH).into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            warn!("Sign-in rejected");
            Redirect::to("/sign-in?error=credentials").into_response()
        }
        Err(e) => {
            warn!(error = %e, "Sign-in failed");
            Redirect::to("/sign-in?error=service").into_response()
        }
    }
}

/// Handle sign-out.
pub async fn sign_out(session: Session) -> Response {
    if let Err(e) = clear_session(&session).await {
        error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();

    Redirect::to("/").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(error_message("credentials"), "Invalid email or password.");
        assert_eq!(error_message("missing"), "Email and password are required.");
        assert_eq!(
            error_message("<script>"),
            "Sign-in is unavailable right now. Please try again later."
        );
    }
}
