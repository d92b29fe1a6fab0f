//! Wrappers that turn failing operations into [`Outcome`] values.
//!
//! Synchronous closures settle immediately; pending values (futures,
//! `IntoFuture` builders, [`Thenable`]s, spawned tasks) settle through a future
//! that never panics and always yields an `Outcome`.

pub mod thenable;
mod wrap;

pub use settle_types::{CaughtError, Failure, Outcome, Success, normalize};
pub use thenable::{OnReject, OnResolve, Thenable, ThenableError, settle_thenable};
pub use wrap::{guard, guard_pending, wrap, wrap_async, wrap_pending, wrap_spawned, wrap_thenable};
