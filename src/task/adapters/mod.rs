//! Adapter implementations for the task context.

pub mod memory;
pub mod postgres;
