//! Error types for task domain validation and parsing.

use super::{TaskAction, TaskId, TaskStatus};
use crate::identity::domain::IdentityKey;
use thiserror::Error;

/// Errors returned while constructing or transitioning tasks and works.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The chapter number does not fit the persisted column.
    #[error("invalid chapter number {0}, expected at most {max}", max = i32::MAX)]
    InvalidChapterNumber(u32),

    /// The work name is empty after trimming.
    #[error("work name must not be empty")]
    EmptyWorkName,

    /// The work name exceeds the storage limit.
    #[error("work name exceeds {0} characters")]
    WorkNameTooLong(usize),

    /// The submission's work-type tag is empty after trimming.
    #[error("work type must not be empty")]
    EmptyWorkType,

    /// The submission's work-type tag exceeds the storage limit.
    #[error("work type exceeds {0} characters")]
    WorkTypeTooLong(usize),

    /// The caller is not the task's current assignee.
    #[error("{caller} is not the assignee of task {task}")]
    NotAssignee {
        /// Task being acted on.
        task: TaskId,
        /// Identity attempting the action.
        caller: IdentityKey,
    },

    /// The active transition policy forbids the action from this status.
    #[error("task {task} cannot {action} from {from}")]
    InvalidTransition {
        /// Task being acted on.
        task: TaskId,
        /// Status before the attempted action.
        from: TaskStatus,
        /// Rejected action.
        action: TaskAction,
    },

    /// The computed deadline is outside the representable time range.
    #[error("deadline for task {0} overflows the calendar")]
    DeadlineOverflow(TaskId),
}

/// Error returned while parsing task statuses from persistence or filters.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing review decisions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown review action: {0}, expected accept, reject, or changes")]
pub struct ParseReviewDecisionError(pub String);

/// Error returned while parsing transition policies.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transition policy: {0}, expected permissive or strict")]
pub struct ParseTransitionPolicyError(pub String);
