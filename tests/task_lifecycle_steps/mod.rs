//! Step definitions for chapter task lifecycle scenarios.

mod given;
mod then;
mod when;
pub mod world;
