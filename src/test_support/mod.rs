//! Test doubles shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).
//!
//! Compiled for the crate's own tests and, through the `test-support`
//! feature, for the integration suites.

mod clock;
mod sleeper;

pub use clock::MutableClock;
pub use sleeper::{ImmediateSleeper, StoppingSleeper};
