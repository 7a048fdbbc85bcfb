//! Adapter implementations for ledger persistence.

pub mod memory;
pub mod postgres;
