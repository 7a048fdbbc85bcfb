//! Task aggregate root and its lifecycle transitions.

use super::{
    ChapterNumber, ReviewDecision, TaskAction, TaskDomainError, TaskId, TaskStatus,
    TransitionPolicy, WorkId,
};
use crate::identity::domain::IdentityKey;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Result of a contributor's submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    work_type: String,
    link: Option<String>,
}

impl Submission {
    /// Longest work-type tag representable in the `tasks` table.
    pub const MAX_WORK_TYPE_LENGTH: usize = 20;

    /// Creates a submission for the given work-type tag (for example
    /// translation or editing).
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyWorkType`] when the trimmed tag is
    /// empty or [`TaskDomainError::WorkTypeTooLong`] when it exceeds
    /// [`Self::MAX_WORK_TYPE_LENGTH`] characters.
    pub fn new(work_type: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = work_type.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyWorkType);
        }
        if trimmed.chars().count() > Self::MAX_WORK_TYPE_LENGTH {
            return Err(TaskDomainError::WorkTypeTooLong(Self::MAX_WORK_TYPE_LENGTH));
        }
        Ok(Self {
            work_type: trimmed.to_owned(),
            link: None,
        })
    }

    /// Attaches the resolved artifact link. Blank links count as absent.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        let raw = link.into();
        let trimmed = raw.trim();
        self.link = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Returns the work-type tag.
    #[must_use]
    pub fn work_type(&self) -> &str {
        &self.work_type
    }

    /// Returns the artifact link, if any.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    work_id: WorkId,
    chapter: ChapterNumber,
    assignee: Option<IdentityKey>,
    status: TaskStatus,
    work_type: Option<String>,
    link: Option<String>,
    review_note: Option<String>,
    due_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning work.
    pub work_id: WorkId,
    /// Persisted chapter number.
    pub chapter: ChapterNumber,
    /// Persisted assignee, if any.
    pub assignee: Option<IdentityKey>,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted work-type tag, if any.
    pub work_type: Option<String>,
    /// Persisted artifact link, if any.
    pub link: Option<String>,
    /// Persisted review note, if any.
    pub review_note: Option<String>,
    /// Persisted deadline, if any.
    pub due_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates an `open` task. A supplied assignee is recorded without
    /// moving the task to `assigned`.
    #[must_use]
    pub fn new(
        work_id: WorkId,
        chapter: ChapterNumber,
        assignee: Option<IdentityKey>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            work_id,
            chapter,
            assignee,
            status: TaskStatus::Open,
            work_type: None,
            link: None,
            review_note: None,
            due_at: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            work_id: data.work_id,
            chapter: data.chapter,
            assignee: data.assignee,
            status: data.status,
            work_type: data.work_type,
            link: data.link,
            review_note: data.review_note,
            due_at: data.due_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning work.
    #[must_use]
    pub const fn work_id(&self) -> WorkId {
        self.work_id
    }

    /// Returns the chapter number.
    #[must_use]
    pub const fn chapter(&self) -> ChapterNumber {
        self.chapter
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&IdentityKey> {
        self.assignee.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the work-type tag set on submission, if any.
    #[must_use]
    pub fn work_type(&self) -> Option<&str> {
        self.work_type.as_deref()
    }

    /// Returns the artifact link, if any.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Returns the latest reviewer note, if any.
    #[must_use]
    pub fn review_note(&self) -> Option<&str> {
        self.review_note.as_deref()
    }

    /// Returns the deadline, set when work starts.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assigns the task and moves it to `assigned`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when `policy` forbids
    /// assignment from the current status.
    pub fn assign(
        &mut self,
        assignee: IdentityKey,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_permitted(policy, TaskAction::Assign)?;
        self.assignee = Some(assignee);
        self.apply(TaskAction::Assign, clock);
        Ok(())
    }

    /// Starts work and sets the deadline to `now + window`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when `caller` is not the
    /// assignee, [`TaskDomainError::InvalidTransition`] when `policy` forbids
    /// starting, or [`TaskDomainError::DeadlineOverflow`] when the deadline
    /// cannot be represented.
    pub fn start(
        &mut self,
        caller: &IdentityKey,
        window: TimeDelta,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_assignee(caller)?;
        self.ensure_permitted(policy, TaskAction::Start)?;
        let deadline = clock
            .utc()
            .checked_add_signed(window)
            .ok_or(TaskDomainError::DeadlineOverflow(self.id))?;
        self.due_at = Some(deadline);
        self.apply(TaskAction::Start, clock);
        Ok(())
    }

    /// Records a submission and moves the task to `submitted`.
    ///
    /// The link is only replaced when the submission carries one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAssignee`] when `caller` is not the
    /// assignee or [`TaskDomainError::InvalidTransition`] when `policy`
    /// forbids submitting.
    pub fn submit(
        &mut self,
        caller: &IdentityKey,
        submission: Submission,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.ensure_assignee(caller)?;
        self.ensure_permitted(policy, TaskAction::Submit)?;
        let Submission { work_type, link } = submission;
        self.work_type = Some(work_type);
        if link.is_some() {
            self.link = link;
        }
        self.apply(TaskAction::Submit, clock);
        Ok(())
    }

    /// Applies a reviewer decision. Rejections and change requests store
    /// `reason` as the review note, empty when absent.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when `policy` forbids
    /// the decision from the current status.
    pub fn review(
        &mut self,
        decision: ReviewDecision,
        reason: Option<String>,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let action = decision.action();
        self.ensure_permitted(policy, action)?;
        if decision != ReviewDecision::Accept {
            self.review_note = Some(reason.unwrap_or_default());
        }
        self.apply(action, clock);
        Ok(())
    }

    /// Returns `true` when the sweeper should mark the task overdue at `now`.
    #[must_use]
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        TaskAction::MarkOverdue.is_edge_from(self.status)
            && self.due_at.is_some_and(|deadline| now > deadline)
    }

    /// Moves a task with a lapsed deadline to `overdue`.
    ///
    /// Returns `false` and leaves the task untouched when it is not sweepable
    /// or its deadline has not passed, so repeated sweeps are harmless.
    pub fn mark_overdue(&mut self, clock: &impl Clock) -> bool {
        if !self.is_past_deadline(clock.utc()) {
            return false;
        }
        self.apply(TaskAction::MarkOverdue, clock);
        true
    }

    fn ensure_assignee(&self, caller: &IdentityKey) -> Result<(), TaskDomainError> {
        if self.assignee.as_ref() == Some(caller) {
            return Ok(());
        }
        Err(TaskDomainError::NotAssignee {
            task: self.id,
            caller: caller.clone(),
        })
    }

    fn ensure_permitted(
        &self,
        policy: TransitionPolicy,
        action: TaskAction,
    ) -> Result<(), TaskDomainError> {
        if policy.permits(self.status, action) {
            return Ok(());
        }
        Err(TaskDomainError::InvalidTransition {
            task: self.id,
            from: self.status,
            action,
        })
    }

    fn apply(&mut self, action: TaskAction, clock: &impl Clock) {
        self.status = action.target();
        self.updated_at = clock.utc();
    }
}
