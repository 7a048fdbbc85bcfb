//! Service layer for assignment, start, and submission transitions.

use crate::config::{ConfigError, ConfigSource};
use crate::error::ErrorKind;
use crate::identity::domain::{Caller, IdentityDomainError, IdentityKey};
use crate::task::{
    domain::{Submission, Task, TaskDomainError, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a transition guard failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The caller lacks a capability or supplied a malformed identity key.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The engine configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

impl TaskLifecycleError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(TaskDomainError::NotAssignee { .. })
            | Self::Identity(IdentityDomainError::MissingCapability { .. }) => {
                ErrorKind::Unauthorized
            }
            Self::Domain(TaskDomainError::InvalidTransition { .. }) => {
                ErrorKind::InvalidTransition
            }
            Self::Domain(TaskDomainError::DeadlineOverflow(_))
            | Self::Config(_)
            | Self::Repository(
                TaskRepositoryError::Persistence(_)
                | TaskRepositoryError::DuplicateTask(_)
                | TaskRepositoryError::UnknownWork(_),
            ) => ErrorKind::Internal,
            Self::Domain(_) | Self::Identity(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorKind::NotFound
            }
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Contributor-facing task lifecycle service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    config: Arc<dyn ConfigSource>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, config: Arc<dyn ConfigSource>, clock: Arc<C>) -> Self {
        Self {
            repository,
            config,
            clock,
        }
    }

    /// Assigns a task to a contributor.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when the caller is not an admin, the
    /// assignee key is malformed, the task does not exist, or the active
    /// policy forbids assignment from the task's status.
    pub async fn assign(
        &self,
        caller: &Caller,
        task_id: TaskId,
        assignee: &str,
    ) -> TaskLifecycleResult<Task> {
        caller.require_admin()?;
        let assignee_key = IdentityKey::new(assignee)?;
        let config = self.config.current().await?;
        let mut task = self.load(task_id).await?;
        task.assign(assignee_key, config.transition_policy(), &*self.clock)?;
        self.repository.update(&task).await?;
        info!(task = %task_id, assignee, "task assigned");
        Ok(task)
    }

    /// Starts work on a task and sets its deadline from the configured
    /// window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] with [`ErrorKind::Unauthorized`] when
    /// the caller is not the assignee; the task is left unchanged.
    pub async fn start(&self, caller: &Caller, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let config = self.config.current().await?;
        let mut task = self.load(task_id).await?;
        task.start(
            caller.identity(),
            config.overdue_window(),
            config.transition_policy(),
            &*self.clock,
        )?;
        self.repository.update(&task).await?;
        info!(
            task = %task_id,
            assignee = %caller.identity(),
            due_at = ?task.due_at(),
            "task started"
        );
        Ok(task)
    }

    /// Records a submission.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] with [`ErrorKind::Unauthorized`] when
    /// the caller is not the assignee; the task is left unchanged.
    pub async fn submit(
        &self,
        caller: &Caller,
        task_id: TaskId,
        submission: Submission,
    ) -> TaskLifecycleResult<Task> {
        let config = self.config.current().await?;
        let mut task = self.load(task_id).await?;
        task.submit(
            caller.identity(),
            submission,
            config.transition_policy(),
            &*self.clock,
        )?;
        self.repository.update(&task).await?;
        info!(
            task = %task_id,
            assignee = %caller.identity(),
            work_type = task.work_type().unwrap_or_default(),
            "task submitted"
        );
        Ok(task)
    }

    async fn load(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }
}
