//! Review decisions and the designation-release signal.

use super::{ParseReviewDecisionError, TaskAction, WorkId};
use crate::identity::domain::IdentityKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reviewer verdict on a submitted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Accept and credit the assignee.
    Accept,
    /// Reject with an optional reason.
    Reject,
    /// Return for rework with an optional reason.
    Changes,
}

impl ReviewDecision {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Changes => "changes",
        }
    }

    /// Returns the lifecycle action the decision applies.
    #[must_use]
    pub const fn action(self) -> TaskAction {
        match self {
            Self::Accept => TaskAction::Accept,
            Self::Reject => TaskAction::Reject,
            Self::Changes => TaskAction::RequestChanges,
        }
    }
}

impl TryFrom<&str> for ReviewDecision {
    type Error = ParseReviewDecisionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            "changes" => Ok(Self::Changes),
            _ => Err(ParseReviewDecisionError(value.to_owned())),
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signal that an assignee has finished every task in a work and may lose
/// the work's external group designation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DesignationRelease {
    assignee: IdentityKey,
    work_id: WorkId,
    role_label: String,
}

impl DesignationRelease {
    /// Creates a release signal.
    #[must_use]
    pub fn new(assignee: IdentityKey, work_id: WorkId, role_label: impl Into<String>) -> Self {
        Self {
            assignee,
            work_id,
            role_label: role_label.into(),
        }
    }

    /// Returns the identity whose designation may be released.
    #[must_use]
    pub const fn assignee(&self) -> &IdentityKey {
        &self.assignee
    }

    /// Returns the finished work.
    #[must_use]
    pub const fn work_id(&self) -> WorkId {
        self.work_id
    }

    /// Returns the external group label to release.
    #[must_use]
    pub fn role_label(&self) -> &str {
        &self.role_label
    }
}
