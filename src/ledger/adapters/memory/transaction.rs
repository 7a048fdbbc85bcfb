//! In-memory repository for ledger entries.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::identity::domain::IdentityKey;
use crate::ledger::{
    domain::{LedgerEntry, TransactionId},
    ports::{TransactionRepository, TransactionRepositoryError, TransactionRepositoryResult},
};

/// Thread-safe in-memory transaction log in append order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionRepository {
    entries: Arc<RwLock<Vec<LedgerEntry>>>,
}

impl InMemoryTransactionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> TransactionRepositoryError {
    TransactionRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn append(&self, entry: &LedgerEntry) -> TransactionRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        if entries.iter().any(|existing| existing.id() == entry.id()) {
            return Err(TransactionRepositoryError::DuplicateTransaction(entry.id()));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn update_status(&self, entry: &LedgerEntry) -> TransactionRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let stored = entries
            .iter_mut()
            .find(|existing| existing.id() == entry.id())
            .ok_or(TransactionRepositoryError::NotFound(entry.id()))?;
        *stored = entry.clone();
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: TransactionId,
    ) -> TransactionRepositoryResult<Option<LedgerEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.iter().find(|entry| entry.id() == id).cloned())
    }

    async fn list_for_beneficiary(
        &self,
        beneficiary: &IdentityKey,
    ) -> TransactionRepositoryResult<Vec<LedgerEntry>> {
        let entries = self.entries.read().map_err(poisoned)?;
        // Reverse append order first so equal timestamps still list newest first.
        let mut matching: Vec<LedgerEntry> = entries
            .iter()
            .rev()
            .filter(|entry| entry.beneficiary() == beneficiary)
            .cloned()
            .collect();
        matching.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
        Ok(matching)
    }
}
