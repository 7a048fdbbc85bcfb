//! Works, tasks, and the task lifecycle.
//!
//! This module holds the work/task registry, the task state machine applied
//! by the lifecycle and review services, and the deadline sweeper that moves
//! lapsed tasks to `overdue`. Accepting a task credits the assignee through
//! the ledger, and finishing the last open task in a work emits a
//! designation release through the [`ports::RoleFinalizer`] port. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
