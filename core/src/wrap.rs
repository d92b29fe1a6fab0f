//! Turning failing operations into [`Outcome`] values.
//!
//! Three call shapes share one shaping step:
//!
//! ```text
//! wrap(f)          f: FnOnce() -> Result<T, E>       -> Outcome<T>          (immediate)
//! wrap_pending(p)  p: IntoFuture<Output = Result>    -> impl Future<Outcome> (deferred)
//! wrap_async(f)    f: FnOnce() -> IntoFuture<...>    -> impl Future<Outcome> (deferred)
//! ```
//!
//! `guard` and `guard_pending` cover operations that cannot return `Err`, so
//! only a panic turns them into a failure.

use std::any::Any;
use std::convert::Infallible;
use std::fmt::Display;
use std::future::{Future, IntoFuture};
use std::panic::{self, AssertUnwindSafe};

use futures_util::future::FutureExt;
use settle_types::{CaughtError, Outcome, normalize};
use tracing::debug;

use crate::thenable::{Thenable, ThenableError, settle_thenable};

// Where a failure came from, for log events only. Callers always see a plain
// `CaughtError`.
const RETURNED: &str = "returned";
const PANICKED: &str = "panicked";
const REJECTED: &str = "rejected";
const JOINED: &str = "join";

/// Run `f` now. `Err` and panics become an immediate `Failure`.
pub fn wrap<T, E>(f: impl FnOnce() -> Result<T, E>) -> Outcome<T>
where
    E: Display + Send + Sync + 'static,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => settle(result, RETURNED),
        Err(payload) => Outcome::failure(caught_panic(payload, PANICKED)),
    }
}

/// Run an infallible `f` now. Only a panic becomes a `Failure`.
pub fn guard<T>(f: impl FnOnce() -> T) -> Outcome<T> {
    wrap(|| Ok::<T, Infallible>(f()))
}

/// Wrap a pending value. The returned future always yields an `Outcome`.
///
/// `IntoFuture::into_future` is called immediately, under the same panic
/// boundary as the future it builds; the future itself runs when the returned
/// one is polled. Dropping the returned future drops the operation with it
/// (see [`wrap_spawned`] for run-to-completion).
pub fn wrap_pending<P, T, E>(pending: P) -> impl Future<Output = Outcome<T>>
where
    P: IntoFuture<Output = Result<T, E>>,
    E: Display + Send + Sync + 'static,
{
    let started = panic::catch_unwind(AssertUnwindSafe(|| pending.into_future()));
    async move {
        let future = match started {
            Ok(future) => future,
            Err(payload) => return Outcome::failure(caught_panic(payload, PANICKED)),
        };
        match AssertUnwindSafe(future).catch_unwind().await {
            Ok(result) => settle(result, REJECTED),
            Err(payload) => Outcome::failure(caught_panic(payload, PANICKED)),
        }
    }
}

/// Wrap a pending value that cannot fail. Only a panic becomes a `Failure`.
///
/// Unlike [`wrap_pending`], `into_future` runs on first poll.
pub fn guard_pending<P>(pending: P) -> impl Future<Output = Outcome<P::Output>>
where
    P: IntoFuture,
{
    wrap_pending(async move { Ok::<_, Infallible>(pending.await) })
}

/// Call `f` now and wrap the pending value it returns.
///
/// A panic inside `f`, or inside the `into_future` of what it returns, settles
/// the returned future as a `Failure` without polling anything. Otherwise this
/// is exactly `wrap_pending(f())`.
pub fn wrap_async<F, P, T, E>(f: F) -> impl Future<Output = Outcome<T>>
where
    F: FnOnce() -> P,
    P: IntoFuture<Output = Result<T, E>>,
    E: Display + Send + Sync + 'static,
{
    let started = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(pending) => Ok(wrap_pending(pending)),
        Err(payload) => Err(caught_panic(payload, PANICKED)),
    };
    async move {
        match started {
            Ok(pending) => pending.await,
            Err(error) => Outcome::failure(error),
        }
    }
}

/// Wrap a callback-style pending value.
///
/// A rejection is normalized from the thenable's own reason.
pub fn wrap_thenable<Th>(thenable: Th) -> impl Future<Output = Outcome<Th::Value>>
where
    Th: Thenable,
    Th::Reason: Display + Sync,
{
    wrap_pending(async move {
        settle_thenable(thenable)
            .await
            .map_err(ThenableError::into_caught)
    })
}

/// Spawn `operation` on the current tokio runtime and wrap its result.
///
/// The task keeps running if the returned future is dropped. A task that
/// panics or is cancelled settles as a `Failure`.
///
/// # Panics
///
/// Panics if called outside a tokio runtime, like `tokio::spawn`.
pub fn wrap_spawned<F, T, E>(operation: F) -> impl Future<Output = Outcome<T>>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + Sync + 'static,
{
    let handle = tokio::spawn(operation);
    async move {
        match handle.await {
            Ok(result) => settle(result, REJECTED),
            Err(join_error) => match join_error.try_into_panic() {
                Ok(payload) => Outcome::failure(caught_panic(payload, JOINED)),
                Err(join_error) => settle(Err(join_error), JOINED),
            },
        }
    }
}

fn caught_panic(payload: Box<dyn Any + Send>, channel: &'static str) -> CaughtError {
    let error = CaughtError::from_panic(payload);
    debug!(channel, error = %error, "wrapped operation failed");
    error
}

/// The shared shaping step: `Ok` is data, `Err` is normalized into the error.
fn settle<T, E>(result: Result<T, E>, channel: &'static str) -> Outcome<T>
where
    E: Display + Send + Sync + 'static,
{
    match result {
        Ok(data) => Outcome::success(data),
        Err(thrown) => {
            let error = normalize(thrown);
            debug!(channel, error = %error, "wrapped operation failed");
            Outcome::failure(error)
        }
    }
}
