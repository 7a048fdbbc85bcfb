//! Folio: task lifecycle and reward engine for a chapter-production
//! community.
//!
//! Works are split into chapter tasks that contributors take through a
//! fixed lifecycle. Reviewers accept, reject, or send work back; acceptance
//! credits the assignee through the reward ledger, and a recurring sweeper
//! marks tasks whose deadline has lapsed.
//!
//! # Architecture
//!
//! Every bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and delivery
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration over ports, one per caller-facing concern
//!
//! # Modules
//!
//! - [`identity`]: Contributor identities, roles, and reward totals
//! - [`task`]: Works, tasks, the lifecycle state machine, reviews, and the
//!   deadline sweeper
//! - [`ledger`]: Points-to-currency conversion and the transaction record
//! - [`config`]: Engine tunables and the runtime setting store

pub mod config;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod pg;
pub mod task;
pub mod telemetry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
