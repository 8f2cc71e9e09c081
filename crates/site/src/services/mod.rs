//! Business logic services for the site.
//!
//! # Services
//!
//! - `auth` - Hosted authentication service client
//! - `fetch_dog` - Random dog widget: fetch an image, record it
//! - `gallery` - List, add, and delete dog records

pub mod auth;
pub mod fetch_dog;
pub mod gallery;
