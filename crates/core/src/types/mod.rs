//! Core types for Adopt a Dog.
//!
//! This module provides type-safe wrappers for the domain concepts shared
//! between the store, the image provider client, and the page handlers.

pub mod breed;
pub mod confirmation;
pub mod dog;
pub mod gate;
pub mod id;
pub mod load_state;
pub mod role;

pub use breed::{Breed, BreedError, UNKNOWN_BREED, breed_from_image_url};
pub use confirmation::{ConfirmError, DeleteConfirmation};
pub use dog::{DogError, DogRecord, NewDog};
pub use gate::{GateState, HOME_PATH, SIGN_IN_PATH};
pub use id::*;
pub use load_state::LoadState;
pub use role::{ADMIN_ROLE, UserRole};
