//! In-memory repository for works.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Work, WorkId, WorkName},
    ports::{WorkRepository, WorkRepositoryError, WorkRepositoryResult},
};

/// Thread-safe in-memory work catalogue in creation order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkRepository {
    works: Arc<RwLock<Vec<Work>>>,
}

impl InMemoryWorkRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> WorkRepositoryError {
    WorkRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl WorkRepository for InMemoryWorkRepository {
    async fn store(&self, work: &Work) -> WorkRepositoryResult<()> {
        let mut works = self.works.write().map_err(poisoned)?;
        if works.iter().any(|existing| existing.id() == work.id()) {
            return Err(WorkRepositoryError::DuplicateWork(work.id()));
        }
        let key = work.name().uniqueness_key();
        if works
            .iter()
            .any(|existing| existing.name().uniqueness_key() == key)
        {
            return Err(WorkRepositoryError::DuplicateName(work.name().clone()));
        }
        works.push(work.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: WorkId) -> WorkRepositoryResult<Option<Work>> {
        let works = self.works.read().map_err(poisoned)?;
        Ok(works.iter().find(|work| work.id() == id).cloned())
    }

    async fn find_by_name(&self, name: &WorkName) -> WorkRepositoryResult<Option<Work>> {
        let works = self.works.read().map_err(poisoned)?;
        let key = name.uniqueness_key();
        Ok(works
            .iter()
            .find(|work| work.name().uniqueness_key() == key)
            .cloned())
    }

    async fn list(&self) -> WorkRepositoryResult<Vec<Work>> {
        let works = self.works.read().map_err(poisoned)?;
        let mut listed = works.clone();
        listed.sort_by_key(Work::created_at);
        Ok(listed)
    }
}
