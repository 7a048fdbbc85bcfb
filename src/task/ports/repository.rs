//! Repository port for task persistence and lookup.

use crate::identity::domain::IdentityKey;
use crate::pg::BlockingError;
use crate::task::domain::{Task, TaskId, TaskStatus, WorkId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task. Concurrent writers to the same
    /// task resolve last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists tasks, optionally restricted to one status, newest first.
    async fn list(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task whose status is one of `statuses`.
    ///
    /// Each stored task is decoded on its own. A task that cannot be decoded
    /// appears as an `Err` entry and the rest of the listing is unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error only when the listing itself cannot be read.
    async fn find_by_statuses(
        &self,
        statuses: &[TaskStatus],
    ) -> TaskRepositoryResult<Vec<TaskRepositoryResult<Task>>>;

    /// Returns every task of `work_id` assigned to `assignee`.
    async fn find_by_assignee_and_work(
        &self,
        assignee: &IdentityKey,
        work_id: WorkId,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Counts tasks per status. Statuses without tasks are omitted.
    async fn count_by_status(&self) -> TaskRepositoryResult<BTreeMap<TaskStatus, u64>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The owning work does not exist.
    #[error("work not found: {0}")]
    UnknownWork(WorkId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<BlockingError> for TaskRepositoryError {
    fn from(err: BlockingError) -> Self {
        Self::persistence(err)
    }
}
