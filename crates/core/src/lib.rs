//! Adopt a Dog Core - Shared domain types.
//!
//! This crate provides the types used by the `site` binary and its tests:
//! dog records, breed labels, user roles, and the small state machines that
//! drive page rendering (load state, delete confirmation, access gate).
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Persistence, authentication, and image lookup are
//! external services reached from the `site` crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, dog records, breeds, roles, and UI state machines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
