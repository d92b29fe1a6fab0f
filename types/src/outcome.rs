//! Two-shape result values.
//!
//! An [`Outcome`] is either a [`Success`] carrying `data` or a [`Failure`]
//! carrying `error`. The enum makes "both present" and "neither present"
//! unrepresentable.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::CaughtError;

/// `{ data: T, error: null }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Success<T> {
    pub data: T,
}

/// `{ data: null, error: E }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Failure<E = CaughtError> {
    pub error: E,
}

/// The value every wrapper produces.
///
/// Wrappers always use the default `E = CaughtError`; the parameter only exists
/// so callers can reshape an outcome with [`Outcome::map_err`].
#[must_use = "an Outcome may hold an error that should be inspected"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome<T, E = CaughtError> {
    Success(Success<T>),
    Failure(Failure<E>),
}

impl<T, E> Outcome<T, E> {
    pub const fn success(data: T) -> Self {
        Self::Success(Success { data })
    }

    pub const fn failure(error: E) -> Self {
        Self::Failure(Failure { error })
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The `data` field. `None` on failure.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(success) => Some(&success.data),
            Self::Failure(_) => None,
        }
    }

    /// The `error` field. `None` on success.
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(&failure.error),
        }
    }

    #[must_use]
    pub fn into_data(self) -> Option<T> {
        self.into_parts().0
    }

    #[must_use]
    pub fn into_error(self) -> Option<E> {
        self.into_parts().1
    }

    /// Split into the `(data, error)` pair. Exactly one side is `Some`.
    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Option<E>) {
        match self {
            Self::Success(Success { data }) => (Some(data), None),
            Self::Failure(Failure { error }) => (None, Some(error)),
        }
    }

    pub fn into_result(self) -> Result<T, E> {
        self.into()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
        match self {
            Self::Success(Success { data }) => Outcome::success(f(data)),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> Outcome<T, F> {
        match self {
            Self::Success(success) => Outcome::Success(success),
            Self::Failure(Failure { error }) => Outcome::failure(f(error)),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        match outcome {
            Outcome::Success(Success { data }) => Ok(data),
            Outcome::Failure(Failure { error }) => Err(error),
        }
    }
}

impl<T, E> From<Success<T>> for Outcome<T, E> {
    fn from(success: Success<T>) -> Self {
        Self::Success(success)
    }
}

impl<T, E> From<Failure<E>> for Outcome<T, E> {
    fn from(failure: Failure<E>) -> Self {
        Self::Failure(failure)
    }
}

// All three shapes serialize as `{ "data": ..., "error": ... }` with the absent
// side written as null.

impl<T: Serialize> Serialize for Success<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Success", 2)?;
        state.serialize_field("data", &self.data)?;
        state.serialize_field("error", &None::<()>)?;
        state.end()
    }
}

impl<E: Serialize> Serialize for Failure<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Failure", 2)?;
        state.serialize_field("data", &None::<()>)?;
        state.serialize_field("error", &self.error)?;
        state.end()
    }
}

impl<T: Serialize, E: Serialize> Serialize for Outcome<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success(success) => success.serialize(serializer),
            Self::Failure(failure) => failure.serialize(serializer),
        }
    }
}
