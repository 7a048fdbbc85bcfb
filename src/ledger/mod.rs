//! Reward ledger: points-to-currency conversion and the transaction record.
//!
//! Accepting a task credits the assignee's point total and balance using the
//! configured conversion rate. Payout and bonus entries are appended to an
//! append-only transaction log whose settlement status is advanced by an
//! external payout process.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
