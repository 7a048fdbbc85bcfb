//! In-memory repository for runtime settings.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::config::ports::{SettingRepository, SettingRepositoryError, SettingRepositoryResult};

/// Thread-safe in-memory setting store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingRepository {
    values: Arc<RwLock<BTreeMap<String, String>>>,
}

impl InMemorySettingRepository {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> SettingRepositoryError {
    SettingRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SettingRepository for InMemorySettingRepository {
    async fn get(&self, key: &str) -> SettingRepositoryResult<Option<String>> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.get(key.trim()).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> SettingRepositoryResult<()> {
        let trimmed_key = key.trim();
        if trimmed_key.is_empty() {
            return Err(SettingRepositoryError::EmptyKey);
        }
        let mut values = self.values.write().map_err(poisoned)?;
        values.insert(trimmed_key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn all(&self) -> SettingRepositoryResult<Vec<(String, String)>> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }
}
