//! Access gate state machine for admin-only pages.

use super::role::UserRole;

/// Where the gate sends visitors without a session.
pub const SIGN_IN_PATH: &str = "/sign-in";

/// Where the gate sends signed-in visitors who are not admins.
pub const HOME_PATH: &str = "/";

/// State of the access check for one navigation into a gated page.
///
/// The check starts in [`Checking`](Self::Checking) and resolves exactly once,
/// from the result of the session lookup, into one of the other three states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// Session lookup in flight.
    #[default]
    Checking,
    /// Admin user; render the wrapped content.
    Authorized,
    /// No user; redirect to sign-in.
    RedirectingUnauthenticated,
    /// Signed in without the admin role; redirect home.
    RedirectingUnauthorized,
}

impl GateState {
    /// Resolve the check from the looked-up user's role (`None` when there is no user).
    ///
    /// Resolving an already resolved state returns it unchanged.
    #[must_use]
    pub const fn resolve(self, role: Option<UserRole>) -> Self {
        match self {
            Self::Checking => match role {
                None => Self::RedirectingUnauthenticated,
                Some(UserRole::Admin) => Self::Authorized,
                Some(UserRole::Member) => Self::RedirectingUnauthorized,
            },
            resolved => resolved,
        }
    }

    /// The redirect target for redirecting states.
    #[must_use]
    pub const fn redirect_target(self) -> Option<&'static str> {
        match self {
            Self::RedirectingUnauthenticated => Some(SIGN_IN_PATH),
            Self::RedirectingUnauthorized => Some(HOME_PATH),
            Self::Checking | Self::Authorized => None,
        }
    }
}
