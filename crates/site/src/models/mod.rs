//! Session-scoped models for the site.
//!
//! Dog records and roles live in `adopt-a-dog-core`; this module only holds
//! what the site keeps in the visitor's session.

pub mod session;

pub use session::keys as session_keys;
