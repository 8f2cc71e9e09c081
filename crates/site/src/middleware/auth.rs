//! Access Gate extractors.
//!
//! Every extraction asks the authentication service for the current user
//! again; nothing about the user is cached in the session or across routes.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::warn;

use adopt_a_dog_core::{GateState, SIGN_IN_PATH};

use crate::models::session_keys;
use crate::services::auth::AuthUser;
use crate::state::AppState;

/// Extractor that runs the Access Gate: signed in with the admin role.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(RequireAdmin(user): RequireAdmin) -> impl IntoResponse {
///     format!("Hello, {}!", user.id)
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

/// Extractor that requires a signed-in user of any role.
pub struct RequireUser(pub AuthUser);

/// Extractor that looks up the current user without rejecting.
pub struct OptionalUser(pub Option<AuthUser>);

/// Rejection carrying the gate's redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateRejection(pub GateState);

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        Redirect::to(self.0.redirect_target().unwrap_or(SIGN_IN_PATH)).into_response()
    }
}

/// Resolve the current user from the session's access token.
///
/// Lookup failures are logged and treated as "no user".
async fn lookup_user(parts: &Parts, state: &AppState) -> Option<AuthUser> {
    // Session is set in extensions by SessionManagerLayer
    let session = parts.extensions.get::<Session>()?;

    let token: String = match session.get(session_keys::ACCESS_TOKEN).await {
        Ok(token) => token?,
        Err(e) => {
            warn!(error = %e, "Failed to read session");
            return None;
        }
    };

    match state.auth().current_user(&token).await {
        Ok(user) => user,
        Err(e) => {
            warn!(error = %e, "Error checking user");
            None
        }
    }
}

/// Run the gate and return the user it admitted, or the rejection.
fn admit(gate: GateState, user: Option<AuthUser>) -> Result<AuthUser, GateRejection> {
    match (gate, user) {
        (GateState::Authorized, Some(user)) => Ok(user),
        (GateState::RedirectingUnauthorized, _) => {
            warn!("Access Denied: User is not admin");
            Err(GateRejection(gate))
        }
        (gate, _) => Err(GateRejection(gate)),
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = GateRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = lookup_user(parts, state).await;
        let gate = GateState::Checking.resolve(user.as_ref().map(|u| u.role));

        admit(gate, user).map(Self)
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = GateRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        lookup_user(parts, state)
            .await
            .map(Self)
            .ok_or(GateRejection(GateState::RedirectingUnauthenticated))
    }
}

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(lookup_user(parts, state).await))
    }
}

/// Helper to store the access token in the session.
///
/// The session ID is cycled first so a pre-sign-in ID is never reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_access_token(
    session: &Session,
    access_token: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::ACCESS_TOKEN, access_token).await
}

/// Helper to clear the session (sign out).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
