//! Service layer for the work and task catalogue.

use crate::error::ErrorKind;
use crate::identity::domain::{Caller, IdentityDomainError, IdentityKey};
use crate::task::{
    domain::{ChapterNumber, Task, TaskDomainError, TaskId, TaskStatus, Work, WorkId, WorkName},
    ports::{TaskRepository, TaskRepositoryError, WorkRepository, WorkRepositoryError},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a chapter task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    work_id: WorkId,
    chapter_number: u32,
    assignee: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request for an unassigned task.
    #[must_use]
    pub const fn new(work_id: WorkId, chapter_number: u32) -> Self {
        Self {
            work_id,
            chapter_number,
            assignee: None,
        }
    }

    /// Records an assignee on creation. The task still starts `open`.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }
}

/// Task counts for the administrative dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSummary {
    by_status: BTreeMap<TaskStatus, u64>,
}

impl TaskSummary {
    /// Builds a summary from per-status counts.
    #[must_use]
    pub const fn from_counts(by_status: BTreeMap<TaskStatus, u64>) -> Self {
        Self { by_status }
    }

    /// Returns the number of tasks in every status.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.by_status
            .values()
            .fold(0, |total, count| total.saturating_add(*count))
    }

    /// Returns the number of tasks in `status`.
    #[must_use]
    pub fn count(&self, status: TaskStatus) -> u64 {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Returns the number of tasks awaiting review.
    #[must_use]
    pub fn submitted(&self) -> u64 {
        self.count(TaskStatus::Submitted)
    }

    /// Returns the number of accepted tasks.
    #[must_use]
    pub fn accepted(&self) -> u64 {
        self.count(TaskStatus::Accepted)
    }

    /// Returns the number of rejected tasks.
    #[must_use]
    pub fn rejected(&self) -> u64 {
        self.count(TaskStatus::Rejected)
    }

    /// Returns the per-status breakdown; statuses without tasks are absent.
    #[must_use]
    pub const fn by_status(&self) -> &BTreeMap<TaskStatus, u64> {
        &self.by_status
    }
}

/// Service-level errors for catalogue operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Task or work validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The caller lacks a capability or supplied a malformed identity key.
    #[error(transparent)]
    Identity(#[from] IdentityDomainError),
    /// Task persistence failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// Work persistence failed.
    #[error(transparent)]
    WorkRepository(#[from] WorkRepositoryError),
    /// The work does not exist.
    #[error("work not found: {0}")]
    WorkNotFound(WorkId),
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

impl RegistryError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Identity(IdentityDomainError::MissingCapability { .. }) => {
                ErrorKind::Unauthorized
            }
            Self::Domain(_) | Self::Identity(_) => ErrorKind::Validation,
            Self::WorkRepository(
                WorkRepositoryError::DuplicateName(_) | WorkRepositoryError::DuplicateWork(_),
            )
            | Self::TaskRepository(TaskRepositoryError::DuplicateTask(_)) => ErrorKind::Conflict,
            Self::WorkNotFound(_)
            | Self::TaskNotFound(_)
            | Self::TaskRepository(
                TaskRepositoryError::NotFound(_) | TaskRepositoryError::UnknownWork(_),
            ) => ErrorKind::NotFound,
            Self::TaskRepository(TaskRepositoryError::Persistence(_))
            | Self::WorkRepository(WorkRepositoryError::Persistence(_)) => ErrorKind::Internal,
        }
    }
}

/// Result type for catalogue service operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Work and task catalogue service.
#[derive(Clone)]
pub struct WorkTaskRegistry<T, W, C>
where
    T: TaskRepository,
    W: WorkRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    works: Arc<W>,
    clock: Arc<C>,
}

impl<T, W, C> WorkTaskRegistry<T, W, C>
where
    T: TaskRepository,
    W: WorkRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new catalogue service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, works: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            works,
            clock,
        }
    }

    /// Creates a work whose external group label equals its name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::WorkRepository`] with
    /// [`WorkRepositoryError::DuplicateName`] when a work with the same name,
    /// compared without regard to case, exists.
    pub async fn create_work(&self, caller: &Caller, name: &str) -> RegistryResult<Work> {
        caller.require_admin()?;
        let work_name = WorkName::new(name)?;
        if self.works.find_by_name(&work_name).await?.is_some() {
            return Err(WorkRepositoryError::DuplicateName(work_name).into());
        }
        let work = Work::new(work_name, &*self.clock);
        self.works.store(&work).await?;
        info!(work = %work.id(), name = %work.name(), "work created");
        Ok(work)
    }

    /// Retrieves a work.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::WorkNotFound`] when the work does not exist.
    pub async fn get_work(&self, id: WorkId) -> RegistryResult<Work> {
        self.works
            .find_by_id(id)
            .await?
            .ok_or(RegistryError::WorkNotFound(id))
    }

    /// Lists every work, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::WorkRepository`] when the lookup fails.
    pub async fn list_works(&self) -> RegistryResult<Vec<Work>> {
        Ok(self.works.list().await?)
    }

    /// Creates an `open` task in an existing work.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::WorkNotFound`] when the work does not exist,
    /// or a validation error for the chapter number or assignee key.
    pub async fn create_task(
        &self,
        caller: &Caller,
        request: CreateTaskRequest,
    ) -> RegistryResult<Task> {
        caller.require_admin()?;
        let CreateTaskRequest {
            work_id,
            chapter_number,
            assignee,
        } = request;
        let chapter = ChapterNumber::new(chapter_number)?;
        let assignee_key = assignee.map(IdentityKey::new).transpose()?;
        let work = self.get_work(work_id).await?;

        let task = Task::new(work.id(), chapter, assignee_key, &*self.clock);
        self.tasks.store(&task).await?;
        info!(task = %task.id(), work = %work.id(), chapter = %chapter, "task created");
        Ok(task)
    }

    /// Retrieves a task.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TaskNotFound`] when the task does not exist.
    pub async fn get_task(&self, id: TaskId) -> RegistryResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(RegistryError::TaskNotFound(id))
    }

    /// Lists tasks, optionally restricted to one status, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TaskRepository`] when the lookup fails.
    pub async fn list_tasks(&self, status: Option<TaskStatus>) -> RegistryResult<Vec<Task>> {
        Ok(self.tasks.list(status).await?)
    }

    /// Summarises task counts for the administrative dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::TaskRepository`] when the counts cannot be
    /// read.
    pub async fn summary(&self) -> RegistryResult<TaskSummary> {
        Ok(TaskSummary::from_counts(self.tasks.count_by_status().await?))
    }
}
