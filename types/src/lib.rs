//! Core value types for settle.
//!
//! This crate contains the result shapes and the error normalization step with
//! no IO and no async. Everything here can be used from any layer.

mod caught;
mod outcome;

pub use caught::{CaughtError, normalize};
pub use outcome::{Failure, Outcome, Success};
