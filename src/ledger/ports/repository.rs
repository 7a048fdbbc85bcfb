//! Repository port for the append-only transaction record.

use crate::identity::domain::IdentityKey;
use crate::ledger::domain::{LedgerEntry, TransactionId};
use crate::pg::BlockingError;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for transaction repository operations.
pub type TransactionRepositoryResult<T> = Result<T, TransactionRepositoryError>;

/// Transaction persistence contract.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Appends a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionRepositoryError::DuplicateTransaction`] when the
    /// identifier already exists.
    async fn append(&self, entry: &LedgerEntry) -> TransactionRepositoryResult<()>;

    /// Persists a settlement status change.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionRepositoryError::NotFound`] when the entry does
    /// not exist.
    async fn update_status(&self, entry: &LedgerEntry) -> TransactionRepositoryResult<()>;

    /// Finds an entry by identifier.
    ///
    /// Returns `None` when the entry does not exist.
    async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> TransactionRepositoryResult<Option<LedgerEntry>>;

    /// Lists the entries for one beneficiary, newest first.
    async fn list_for_beneficiary(
        &self,
        beneficiary: &IdentityKey,
    ) -> TransactionRepositoryResult<Vec<LedgerEntry>>;
}

/// Errors returned by transaction repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TransactionRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate transaction identifier: {0}")]
    DuplicateTransaction(TransactionId),

    /// The entry was not found.
    #[error("transaction not found: {0}")]
    NotFound(TransactionId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransactionRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<BlockingError> for TransactionRepositoryError {
    fn from(err: BlockingError) -> Self {
        Self::persistence(err)
    }
}
