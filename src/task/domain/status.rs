//! Task statuses, lifecycle actions, and the transition table.

use super::{ParseTaskStatusError, ParseTransitionPolicyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created and waiting for an assignee.
    Open,
    /// Assigned but not yet started.
    Assigned,
    /// Being worked on; the deadline clock is running.
    InProgress,
    /// Awaiting review.
    Submitted,
    /// Accepted and credited.
    Accepted,
    /// Rejected by a reviewer.
    Rejected,
    /// Returned to the assignee for rework.
    ChangesRequested,
    /// Deadline passed before submission.
    Overdue,
}

impl TaskStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 8] = [
        Self::Open,
        Self::Assigned,
        Self::InProgress,
        Self::Submitted,
        Self::Accepted,
        Self::Rejected,
        Self::ChangesRequested,
        Self::Overdue,
    ];

    /// Statuses the deadline sweeper inspects.
    pub const SWEEPABLE: [Self; 2] = [Self::Assigned, Self::InProgress];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Submitted => "submitted",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::ChangesRequested => "changes_requested",
            Self::Overdue => "overdue",
        }
    }

    /// Returns `true` for statuses no further work flows out of.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseTaskStatusError(value.to_owned()))
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action that moves a task between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Administrator assigns the task.
    Assign,
    /// Assignee starts work.
    Start,
    /// Assignee submits the result.
    Submit,
    /// Reviewer accepts the submission.
    Accept,
    /// Reviewer rejects the submission.
    Reject,
    /// Reviewer returns the submission for rework.
    RequestChanges,
    /// Scheduler marks a lapsed deadline.
    MarkOverdue,
}

impl TaskAction {
    /// Returns a stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Start => "start",
            Self::Submit => "submit",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::RequestChanges => "request_changes",
            Self::MarkOverdue => "mark_overdue",
        }
    }

    /// Returns the status the action leads to.
    #[must_use]
    pub const fn target(self) -> TaskStatus {
        match self {
            Self::Assign => TaskStatus::Assigned,
            Self::Start => TaskStatus::InProgress,
            Self::Submit => TaskStatus::Submitted,
            Self::Accept => TaskStatus::Accepted,
            Self::Reject => TaskStatus::Rejected,
            Self::RequestChanges => TaskStatus::ChangesRequested,
            Self::MarkOverdue => TaskStatus::Overdue,
        }
    }

    /// Returns the statuses the lifecycle graph allows the action from.
    #[must_use]
    pub const fn sources(self) -> &'static [TaskStatus] {
        match self {
            Self::Assign => &[TaskStatus::Open, TaskStatus::Assigned, TaskStatus::Overdue],
            Self::Start => &[
                TaskStatus::Assigned,
                TaskStatus::ChangesRequested,
                TaskStatus::Overdue,
            ],
            Self::Submit => &[
                TaskStatus::InProgress,
                TaskStatus::ChangesRequested,
                TaskStatus::Overdue,
            ],
            Self::Accept | Self::Reject | Self::RequestChanges => &[TaskStatus::Submitted],
            Self::MarkOverdue => &TaskStatus::SWEEPABLE,
        }
    }

    /// Returns `true` when the lifecycle graph has an edge for the action
    /// from `from`.
    #[must_use]
    pub fn is_edge_from(self, from: TaskStatus) -> bool {
        self.sources().contains(&from)
    }
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How strictly the transition table is enforced.
///
/// The deadline sweep is always held to its edge; under `Permissive` every
/// other action is applied from any status once the identity guard passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Only identity and deadline preconditions are enforced.
    #[default]
    Permissive,
    /// Actions outside the transition table are rejected.
    Strict,
}

impl TransitionPolicy {
    /// Returns the canonical configuration representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        }
    }

    /// Returns `true` when the policy lets `action` run from `from`.
    #[must_use]
    pub fn permits(self, from: TaskStatus, action: TaskAction) -> bool {
        match (self, action) {
            (_, TaskAction::MarkOverdue) | (Self::Strict, _) => action.is_edge_from(from),
            (Self::Permissive, _) => true,
        }
    }
}

impl TryFrom<&str> for TransitionPolicy {
    type Error = ParseTransitionPolicyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            _ => Err(ParseTransitionPolicyError(value.to_owned())),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
