//! Adapter implementations for the setting store.

pub mod memory;
pub mod postgres;
