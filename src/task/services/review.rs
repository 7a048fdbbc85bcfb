//! Review orchestration: the decision transition, the acceptance credit, and
//! the designation-release hook.

use crate::config::{ConfigError, ConfigSource};
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Caller, IdentityDomainError, IdentityKey},
    ports::IdentityRepository,
};
use crate::ledger::{
    domain::Credit,
    ports::TransactionRepository,
    services::{LedgerService, LedgerServiceError},
};
use crate::task::{
    domain::{
        DesignationRelease, ParseReviewDecisionError, ReviewDecision, Task, TaskDomainError,
        TaskId,
    },
    ports::{
        RoleFinalizer, RoleFinalizerError, TaskRepository, TaskRepositoryError, WorkRepository,
        WorkRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Request payload for reviewing a submitted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    task_id: TaskId,
    decision: ReviewDecision,
    reason: Option<String>,
    points: Option<u32>,
}

impl ReviewRequest {
    /// Creates a review request.
    #[must_use]
    pub const fn new(task_id: TaskId, decision: ReviewDecision) -> Self {
        Self {
            task_id,
            decision,
            reason: None,
            points: None,
        }
    }

    /// Creates a review request from a wire action (`accept`, `reject`, or
    /// `changes`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseReviewDecisionError`] for any other action.
    pub fn from_action(task_id: TaskId, action: &str) -> Result<Self, ParseReviewDecisionError> {
        Ok(Self::new(task_id, ReviewDecision::try_from(action)?))
    }

    /// Sets the reason stored with a rejection or change request.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Overrides the configured acceptance award.
    #[must_use]
    pub const fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }
}

/// Everything a review changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    task: Task,
    credit: Option<Credit>,
    released: Option<DesignationRelease>,
}

impl ReviewOutcome {
    /// Returns the reviewed task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the acceptance credit, absent for rejections, change requests,
    /// and unassigned tasks.
    #[must_use]
    pub const fn credit(&self) -> Option<&Credit> {
        self.credit.as_ref()
    }

    /// Returns the designation release emitted by the review, if any.
    #[must_use]
    pub const fn released(&self) -> Option<&DesignationRelease> {
        self.released.as_ref()
    }
}

/// Service-level errors for review operations.
#[derive(Debug, Error)]
pub enum ReviewServiceError {
    /// The policy forbids the decision from the task's status.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The caller may not review.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),
    /// The review action is unknown.
    #[error(transparent)]
    Decision(#[from] ParseReviewDecisionError),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Work lookup failed.
    #[error(transparent)]
    WorkRepository(#[from] WorkRepositoryError),
    /// The acceptance credit failed.
    #[error(transparent)]
    Ledger(#[from] LedgerServiceError),
    /// The engine configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The designation release could not be delivered.
    #[error(transparent)]
    Finalizer(#[from] RoleFinalizerError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl ReviewServiceError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(IdentityDomainError::MissingCapability { .. })
            | Self::Domain(TaskDomainError::NotAssignee { .. }) => ErrorKind::Unauthorized,
            Self::Domain(TaskDomainError::InvalidTransition { .. }) => {
                ErrorKind::InvalidTransition
            }
            Self::Domain(_) | Self::Identity(_) | Self::Decision(_) => ErrorKind::Validation,
            Self::Ledger(err) => err.kind(),
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
            Self::Repository(_)
            | Self::WorkRepository(_)
            | Self::Config(_)
            | Self::Finalizer(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for review service operations.
pub type ReviewServiceResult<T> = Result<T, ReviewServiceError>;

/// Reviewer-facing orchestration service.
#[derive(Clone)]
pub struct ReviewService<T, W, X, I, C>
where
    T: TaskRepository,
    W: WorkRepository,
    X: TransactionRepository,
    I: IdentityRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    works: Arc<W>,
    ledger: LedgerService<X, I, C>,
    finalizer: Arc<dyn RoleFinalizer>,
    config: Arc<dyn ConfigSource>,
    clock: Arc<C>,
}

impl<T, W, X, I, C> ReviewService<T, W, X, I, C>
where
    T: TaskRepository,
    W: WorkRepository,
    X: TransactionRepository,
    I: IdentityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new review service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        works: Arc<W>,
        ledger: LedgerService<X, I, C>,
        finalizer: Arc<dyn RoleFinalizer>,
        config: Arc<dyn ConfigSource>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            works,
            ledger,
            finalizer,
            config,
            clock,
        }
    }

    /// Applies a reviewer decision.
    ///
    /// Accepting credits the assignee; an unassigned task is accepted
    /// without credit. The credit is computed and checked before the task is
    /// written, and a credit that still fails to apply restores the task as
    /// it was, so an accepted task always carries its credit. After any
    /// decision, an assignee with no remaining non-terminal task in the same
    /// work is released through the [`RoleFinalizer`].
    ///
    /// # Errors
    ///
    /// Returns [`ReviewServiceError`] when the caller may not review, the task
    /// does not exist, the assignee of an accepted task is not registered or
    /// cannot absorb the credit (checked before any change), the policy
    /// forbids the decision, or the credit fails to apply.
    pub async fn review(
        &self,
        caller: &Caller,
        request: ReviewRequest,
    ) -> ReviewServiceResult<ReviewOutcome> {
        caller.require_reviewer()?;
        let ReviewRequest {
            task_id,
            decision,
            reason,
            points,
        } = request;
        let config = self.config.current().await?;
        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ReviewServiceError::NotFound(task_id))?;
        let previous = task.clone();
        let assignee = task.assignee().cloned();

        let credit = match assignee
            .as_ref()
            .filter(|_| decision == ReviewDecision::Accept)
        {
            Some(beneficiary) => Some(
                self.ledger
                    .prepare_credit(beneficiary, points, &config)
                    .await?,
            ),
            None => None,
        };

        task.review(decision, reason, config.transition_policy(), &*self.clock)?;
        self.tasks.update(&task).await?;
        if let Some(pending) = credit.as_ref()
            && let Err(err) = self.ledger.apply_credit(pending).await
        {
            self.restore(&previous).await;
            return Err(err.into());
        }
        info!(
            task = %task_id,
            reviewer = %caller.identity(),
            decision = decision.as_str(),
            "task reviewed"
        );

        let released = match assignee.as_ref() {
            Some(finished) => self.finalize_designation(finished, &task).await?,
            None => None,
        };

        Ok(ReviewOutcome {
            task,
            credit,
            released,
        })
    }

    /// Writes back the task as loaded after its credit failed.
    async fn restore(&self, previous: &Task) {
        match self.tasks.update(previous).await {
            Ok(()) => warn!(
                task = %previous.id(),
                status = previous.status().as_str(),
                "acceptance credit failed; task restored"
            ),
            Err(err) => error!(
                task = %previous.id(),
                error = %err,
                "acceptance credit failed and the task could not be restored"
            ),
        }
    }

    async fn finalize_designation(
        &self,
        assignee: &IdentityKey,
        reviewed: &Task,
    ) -> ReviewServiceResult<Option<DesignationRelease>> {
        let work_id = reviewed.work_id();
        let remaining = self
            .tasks
            .find_by_assignee_and_work(assignee, work_id)
            .await?;
        if remaining.iter().any(|task| !task.status().is_terminal()) {
            return Ok(None);
        }

        let Some(work) = self.works.find_by_id(work_id).await? else {
            warn!(
                task = %reviewed.id(),
                work = %work_id,
                "work missing; skipping designation release"
            );
            return Ok(None);
        };

        let release = DesignationRelease::new(assignee.clone(), work_id, work.role_label());
        self.finalizer.release(release.clone()).await?;
        info!(
            assignee = %assignee,
            work = %work_id,
            role_label = work.role_label(),
            "designation released"
        );
        Ok(Some(release))
    }
}
