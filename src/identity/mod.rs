//! Contributor and reviewer identities.
//!
//! Identities carry the role tag the boundary checks before admin or review
//! actions, the accumulated reward totals credited by the ledger, and the
//! self-service payout preferences. The module follows the same hexagonal
//! split as the task context:
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
