//! Repository port for string-valued runtime settings.

use crate::pg::BlockingError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for setting repository operations.
pub type SettingRepositoryResult<T> = Result<T, SettingRepositoryError>;

/// Key/value setting persistence contract.
#[async_trait]
pub trait SettingRepository: Send + Sync {
    /// Returns the value stored under `key`, if any.
    async fn get(&self, key: &str) -> SettingRepositoryResult<Option<String>>;

    /// Inserts or replaces the value stored under `key`.
    async fn put(&self, key: &str, value: &str) -> SettingRepositoryResult<()>;

    /// Returns every stored setting ordered by key.
    async fn all(&self) -> SettingRepositoryResult<Vec<(String, String)>>;
}

/// Errors returned by setting repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SettingRepositoryError {
    /// The key is empty after trimming.
    #[error("setting key must not be empty")]
    EmptyKey,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SettingRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<BlockingError> for SettingRepositoryError {
    fn from(err: BlockingError) -> Self {
        Self::persistence(err)
    }
}
