//! Repository port for the work catalogue.

use crate::pg::BlockingError;
use crate::task::domain::{Work, WorkId, WorkName};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for work repository operations.
pub type WorkRepositoryResult<T> = Result<T, WorkRepositoryError>;

/// Work persistence contract.
#[async_trait]
pub trait WorkRepository: Send + Sync {
    /// Stores a new work.
    ///
    /// # Errors
    ///
    /// Returns [`WorkRepositoryError::DuplicateName`] when a work with the
    /// same name, compared without regard to case, already exists.
    async fn store(&self, work: &Work) -> WorkRepositoryResult<()>;

    /// Finds a work by identifier.
    ///
    /// Returns `None` when the work does not exist.
    async fn find_by_id(&self, id: WorkId) -> WorkRepositoryResult<Option<Work>>;

    /// Finds a work by name without regard to case.
    ///
    /// Returns `None` when no work carries the name.
    async fn find_by_name(&self, name: &WorkName) -> WorkRepositoryResult<Option<Work>>;

    /// Lists every work, oldest first.
    async fn list(&self) -> WorkRepositoryResult<Vec<Work>>;
}

/// Errors returned by work repository implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkRepositoryError {
    /// A work with the same identifier already exists.
    #[error("duplicate work identifier: {0}")]
    DuplicateWork(WorkId),

    /// A work with the same case-insensitive name already exists.
    #[error("work already exists: {0}")]
    DuplicateName(WorkName),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<BlockingError> for WorkRepositoryError {
    fn from(err: BlockingError) -> Self {
        Self::persistence(err)
    }
}
