//! Loading / error / content state for data-driven views.

/// The three mutually exclusive states of a data-driven view.
///
/// Every view that waits on an external call renders exactly one of these:
/// a spinner while pending, an error panel with a message on failure, or the
/// content on success.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    /// The external call has not resolved yet.
    #[default]
    Loading,
    /// The external call failed; the message is shown to the user.
    Error(String),
    /// The external call succeeded.
    Ready(T),
}

impl<T> LoadState<T> {
    /// Build a terminal state from a result, rendering the error with `Display`.
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::Error(e.to_string()),
        }
    }

    /// Map the ready value, leaving loading and error states untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Loading => LoadState::Loading,
            Self::Error(message) => LoadState::Error(message),
            Self::Ready(value) => LoadState::Ready(f(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_loading() {
        assert_eq!(LoadState::<u8>::default(), LoadState::Loading);
    }

    #[test]
    fn test_from_result() {
        let ok: LoadState<u8> = LoadState::from_result(Ok::<u8, String>(3));
        assert_eq!(ok, LoadState::Ready(3));

        let err: LoadState<u8> = LoadState::from_result(Err::<u8, _>("boom"));
        assert_eq!(err, LoadState::Error("boom".to_string()));
    }

    #[test]
    fn test_map_only_touches_ready() {
        assert_eq!(LoadState::Ready(2).map(|n| n * 2), LoadState::Ready(4));
        assert_eq!(
            LoadState::<u8>::Error("x".into()).map(|n| n * 2),
            LoadState::Error("x".into())
        );
        assert_eq!(LoadState::<u8>::Loading.map(|n| n * 2), LoadState::Loading);
    }
}
