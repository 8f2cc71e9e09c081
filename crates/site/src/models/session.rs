//! Session-related types.
//!
//! The session never stores the user profile. It stores the auth service's
//! access token, and the profile is fetched again on every gated navigation.

/// Session keys.
pub mod keys {
    /// Key for the auth service access token.
    pub const ACCESS_TOKEN: &str = "access_token";

    /// Key for the admin's pending delete selection (`DeleteConfirmation`).
    pub const PENDING_DELETE: &str = "pending_delete";
}
