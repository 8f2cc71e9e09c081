//! Integration tests for Adopt a Dog.
//!
//! The tests in `tests/` drive a running site over HTTP and are ignored by
//! default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the site against a database and the auth service
//! cargo run -p adopt-a-dog-site
//!
//! # Run integration tests
//! cargo test -p adopt-a-dog-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `SITE_BASE_URL` - Site under test (default: <http://localhost:3000>)
//! - `TEST_ADMIN_EMAIL`, `TEST_ADMIN_PASSWORD` - Admin account for the
//!   signed-in tests
//! - `TEST_MEMBER_EMAIL`, `TEST_MEMBER_PASSWORD` - Non-admin account

use reqwest::{Client, StatusCode, redirect};
use thiserror::Error;

/// Where the site redirects after a successful sign-in.
pub const SIGNED_IN_PATH: &str = "/protected";

/// Errors from signing a test account in.
#[derive(Debug, Error)]
pub enum SignInError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sign-in rejected: {status} redirecting to '{location}'")]
    Rejected { status: StatusCode, location: String },
}

/// Base URL for the site under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("SITE_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Credentials for a test account, if configured.
#[must_use]
pub fn credentials(prefix: &str) -> Option<(String, String)> {
    let email = std::env::var(format!("TEST_{prefix}_EMAIL")).ok()?;
    let password = std::env::var(format!("TEST_{prefix}_PASSWORD")).ok()?;
    Some((email, password))
}

/// A client with a cookie store that does not follow redirects.
///
/// # Errors
///
/// Returns an error if the client cannot be built.
pub fn client() -> reqwest::Result<Client> {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
}

/// Sign in and return the client holding the session cookie.
///
/// # Errors
///
/// Returns `SignInError::Rejected` unless the site redirects to
/// [`SIGNED_IN_PATH`], which rules out the `/sign-in?error=...` redirect.
pub async fn signed_in_client(email: &str, password: &str) -> Result<Client, SignInError> {
    let client = client()?;
    let response = client
        .post(format!("{}/sign-in", base_url()))
        .form(&[("email", email), ("password", password)])
        .send()
        .await?;
    check_sign_in(response.status(), location(&response))?;
    Ok(client)
}

fn check_sign_in(status: StatusCode, location: &str) -> Result<(), SignInError> {
    if status.is_redirection() && location == SIGNED_IN_PATH {
        Ok(())
    } else {
        Err(SignInError::Rejected {
            status,
            location: location.to_string(),
        })
    }
}

/// The `Location` header of a response, or an empty string.
#[must_use]
pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
