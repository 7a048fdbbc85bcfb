//! Adapter implementations for identity persistence.

pub mod memory;
pub mod postgres;
