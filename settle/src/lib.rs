//! settle - explicit `data`/`error` outcomes instead of `?`, `catch_unwind`
//! and hand-written `match` blocks around every call.
//!
//! # Architecture
//!
//! ```text
//! settle-types   Outcome / Success / Failure, CaughtError, normalize()
//!      |
//! settle-core    wrap / guard            (immediate)
//!                wrap_pending / wrap_async / guard_pending
//!                wrap_thenable / wrap_spawned   (deferred)
//! ```
//!
//! Every wrapper produces an [`Outcome`] whose error, if any, is a
//! [`CaughtError`] carrying a `message`:
//!
//! ```
//! let parsed = settle::wrap(|| "17".parse::<u8>());
//! assert_eq!(parsed.data(), Some(&17));
//!
//! let parsed = settle::wrap(|| "seventeen".parse::<u8>());
//! assert_eq!(
//!     parsed.error().map(settle::CaughtError::message),
//!     Some("invalid digit found in string")
//! );
//! ```

pub use settle_core::thenable;
pub use settle_core::{
    OnReject, OnResolve, Thenable, ThenableError, guard, guard_pending, settle_thenable, wrap,
    wrap_async, wrap_pending, wrap_spawned, wrap_thenable,
};
pub use settle_types::{CaughtError, Failure, Outcome, Success, normalize};
