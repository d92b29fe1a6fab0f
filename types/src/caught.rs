//! The normalized error shape every failure is coerced into.

use std::any::Any;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

const UNKNOWN_PANIC: &str = "unknown panic";

/// A caught failure with a string message.
///
/// Whatever an operation returned as `Err`, rejected with, or panicked with ends
/// up here. The original value is kept as a type-erased payload when it can be
/// shared across threads, so callers that care can still recover it with
/// [`CaughtError::downcast_ref`].
#[derive(Error)]
#[error("{message}")]
pub struct CaughtError {
    message: String,
    payload: Option<Box<dyn Any + Send + Sync>>,
}

impl CaughtError {
    /// Build an error carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            payload: None,
        }
    }

    /// Build an error from a panic payload.
    ///
    /// `&'static str` and `String` payloads (everything `panic!` produces) give
    /// their text verbatim. Anything else passed to `panic_any` has no string
    /// form, so the message falls back to `"unknown panic"`.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        match payload.downcast::<String>() {
            Ok(text) => {
                let message = (*text).clone();
                let payload: Box<dyn Any + Send + Sync> = text;
                Self {
                    message,
                    payload: Some(payload),
                }
            }
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(text) => Self {
                    message: (*text).to_string(),
                    payload: Some(Box::new(*text)),
                },
                None => Self::new(UNKNOWN_PANIC),
            },
        }
    }

    /// The `Display` text of whatever was thrown.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original thrown value, if it was of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }

    /// Whether the original thrown value was of type `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Take the original thrown value back out, if it was of type `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        match self.payload {
            Some(payload) => match payload.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(payload) => Err(Self {
                    message: self.message,
                    payload: Some(payload),
                }),
            },
            None => Err(self),
        }
    }
}

impl fmt::Debug for CaughtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaughtError")
            .field("message", &self.message)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

impl Serialize for CaughtError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CaughtError", 1)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

/// Coerce any thrown value into a [`CaughtError`].
///
/// A value that already is a `CaughtError` comes back unchanged. Anything else
/// gets its `Display` form as the message and is kept as the payload.
pub fn normalize<E>(thrown: E) -> CaughtError
where
    E: fmt::Display + Send + Sync + 'static,
{
    let message = thrown.to_string();
    let boxed: Box<dyn Any + Send + Sync> = Box::new(thrown);
    match boxed.downcast::<CaughtError>() {
        Ok(caught) => *caught,
        Err(payload) => CaughtError {
            message,
            payload: Some(payload),
        },
    }
}
