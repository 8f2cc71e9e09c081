//! Authentication error types.

use thiserror::Error;

/// Errors that can occur when talking to the authentication service.
///
/// Lookups of the current user treat every variant as "no user".
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email or password missing from the sign-in form.
    #[error("email and password are required")]
    MissingCredentials,

    /// Service unreachable or the request failed in transit.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with an unexpected status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Service answered with an unexpected body.
    #[error("Parse error: {0}")]
    Parse(String),
}
