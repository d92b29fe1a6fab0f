//! Callback-style pending values.
//!
//! Some APIs hand back an object that reports completion through a pair of
//! continuations instead of implementing `Future`. Implementing [`Thenable`]
//! is all such a type needs to be wrapped; [`settle_thenable`] bridges the
//! continuations into a future.

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use settle_types::{CaughtError, normalize};
use thiserror::Error;
use tokio::sync::oneshot;

pub type OnResolve<T> = Box<dyn FnOnce(T) + Send>;
pub type OnReject<R> = Box<dyn FnOnce(R) + Send>;

/// A value that can register a success and a failure continuation.
///
/// Implementations should call at most one of the two. If both fire, only the
/// first is observed.
pub trait Thenable {
    type Value: Send + 'static;
    type Reason: Send + 'static;

    fn then(self, on_resolve: OnResolve<Self::Value>, on_reject: OnReject<Self::Reason>);
}

#[derive(Debug, Error)]
pub enum ThenableError<R> {
    #[error("{0}")]
    Rejected(R),
    #[error("thenable dropped both continuations without settling")]
    Abandoned,
}

impl<R> ThenableError<R>
where
    R: Display + Send + Sync + 'static,
{
    /// Normalize the rejection reason itself, not this wrapper around it.
    #[must_use]
    pub fn into_caught(self) -> CaughtError {
        match self {
            Self::Rejected(reason) => normalize(reason),
            abandoned @ Self::Abandoned => CaughtError::new(abandoned.to_string()),
        }
    }
}

type Slot<T> = Arc<Mutex<Option<oneshot::Sender<T>>>>;

/// Register continuations on `thenable` and wait for the first one to fire.
///
/// Registration happens on first poll.
pub async fn settle_thenable<Th: Thenable>(
    thenable: Th,
) -> Result<Th::Value, ThenableError<Th::Reason>> {
    let (tx, rx) = oneshot::channel();
    let resolve_slot: Slot<_> = Arc::new(Mutex::new(Some(tx)));
    let reject_slot = Arc::clone(&resolve_slot);

    thenable.then(
        Box::new(move |value: Th::Value| deliver(&resolve_slot, Ok(value))),
        Box::new(move |reason: Th::Reason| {
            deliver(&reject_slot, Err(ThenableError::Rejected(reason)));
        }),
    );

    rx.await.unwrap_or_else(|_| Err(ThenableError::Abandoned))
}

fn deliver<T>(slot: &Mutex<Option<oneshot::Sender<T>>>, value: T) {
    let sender = match slot.lock() {
        Ok(mut guard) => guard.take(),
        Err(poisoned) => poisoned.into_inner().take(),
    };
    match sender {
        // A closed receiver means the caller dropped the pending result.
        Some(tx) => {
            let _ = tx.send(value);
        }
        None => tracing::debug!("thenable settled twice; ignoring the later continuation"),
    }
}
