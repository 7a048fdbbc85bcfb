//! Repository port for identity persistence and reward crediting.

use crate::identity::domain::{Identity, IdentityKey};
use crate::pg::BlockingError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity repository operations.
pub type IdentityRepositoryResult<T> = Result<T, IdentityRepositoryError>;

/// Identity persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Stores a new identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::DuplicateIdentity`] when the key is
    /// already registered.
    async fn store(&self, identity: &Identity) -> IdentityRepositoryResult<()>;

    /// Persists profile changes (display name, role, payout preferences,
    /// last-seen time). Reward totals are left to [`Self::credit`].
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::NotFound`] when the identity does
    /// not exist.
    async fn update(&self, identity: &Identity) -> IdentityRepositoryResult<()>;

    /// Finds an identity by key.
    ///
    /// Returns `None` when the identity does not exist.
    async fn find_by_key(&self, key: &IdentityKey) -> IdentityRepositoryResult<Option<Identity>>;

    /// Atomically adds points and balance to an identity and returns the
    /// updated record.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::NotFound`] when the identity does
    /// not exist or [`IdentityRepositoryError::CreditOverflow`] when a total
    /// would overflow.
    async fn credit(
        &self,
        key: &IdentityKey,
        points: u64,
        amount_minor: i64,
    ) -> IdentityRepositoryResult<Identity>;
}

/// Errors returned by identity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityRepositoryError {
    /// An identity with the same key already exists.
    #[error("duplicate identity: {0}")]
    DuplicateIdentity(IdentityKey),

    /// The identity was not found.
    #[error("identity not found: {0}")]
    NotFound(IdentityKey),

    /// A credit would overflow the stored totals.
    #[error("credit overflows the totals of {0}")]
    CreditOverflow(IdentityKey),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<BlockingError> for IdentityRepositoryError {
    fn from(err: BlockingError) -> Self {
        Self::persistence(err)
    }
}
