//! Two-step delete confirmation.

use serde::{Deserialize, Serialize};

use super::id::DogId;

/// Errors from confirming a deletion.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmError {
    /// Nothing has been marked for deletion.
    #[error("no dog is pending deletion")]
    NothingPending,
    /// A different dog is marked for deletion.
    #[error("dog {requested} is not the one pending deletion")]
    Mismatch {
        /// The ID the confirm request named.
        requested: DogId,
    },
}

/// Pending delete selection, keyed by record ID.
///
/// A record is deleted only after [`select`](Self::select) and then
/// [`confirm`](Self::confirm) with the same ID. [`cancel`](Self::cancel)
/// clears the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pending: Option<DogId>,
}

impl DeleteConfirmation {
    /// Mark a record for deletion, replacing any earlier selection.
    pub const fn select(&mut self, id: DogId) {
        self.pending = Some(id);
    }

    /// Clear the selection.
    pub const fn cancel(&mut self) {
        self.pending = None;
    }

    /// The record currently awaiting confirmation.
    #[must_use]
    pub const fn pending(&self) -> Option<DogId> {
        self.pending
    }

    /// Whether `id` is awaiting confirmation.
    #[must_use]
    pub fn is_pending(&self, id: DogId) -> bool {
        self.pending == Some(id)
    }

    /// Check that `id` matches the selection.
    ///
    /// The selection is left in place; callers clear it with
    /// [`cancel`](Self::cancel) once the delete has succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfirmError`] if nothing is selected or a different record is.
    pub fn confirm(&self, id: DogId) -> Result<DogId, ConfirmError> {
        match self.pending {
            None => Err(ConfirmError::NothingPending),
            Some(pending) if pending == id => Ok(id),
            Some(_) => Err(ConfirmError::Mismatch { requested: id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog_id() -> DogId {
        DogId::new(uuid::Uuid::new_v4())
    }

    #[test]
    fn test_confirm_after_select() {
        let id = dog_id();
        let mut confirmation = DeleteConfirmation::default();
        confirmation.select(id);

        assert!(confirmation.is_pending(id));
        assert_eq!(confirmation.confirm(id), Ok(id));
    }

    #[test]
    fn test_confirm_without_select() {
        let confirmation = DeleteConfirmation::default();
        assert_eq!(
            confirmation.confirm(dog_id()),
            Err(ConfirmError::NothingPending)
        );
    }

    #[test]
    fn test_confirm_mismatch() {
        let (selected, other) = (dog_id(), dog_id());
        let mut confirmation = DeleteConfirmation::default();
        confirmation.select(selected);

        assert_eq!(
            confirmation.confirm(other),
            Err(ConfirmError::Mismatch { requested: other })
        );
        assert_eq!(confirmation.pending(), Some(selected));
    }

    #[test]
    fn test_cancel_clears_selection() {
        let id = dog_id();
        let mut confirmation = DeleteConfirmation::default();
        confirmation.select(id);
        confirmation.cancel();

        assert_eq!(confirmation.pending(), None);
        assert_eq!(confirmation.confirm(id), Err(ConfirmError::NothingPending));
    }

    #[test]
    fn test_select_replaces_previous() {
        let (first, second) = (dog_id(), dog_id());
        let mut confirmation = DeleteConfirmation::default();
        confirmation.select(first);
        confirmation.select(second);

        assert!(!confirmation.is_pending(first));
        assert!(confirmation.is_pending(second));
    }
}
