//! In-memory repository for identities.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::{Identity, IdentityDomainError, IdentityKey, PersistedIdentityData},
    ports::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult},
};

/// Thread-safe in-memory identity repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityRepository {
    state: Arc<RwLock<HashMap<IdentityKey, Identity>>>,
}

impl InMemoryIdentityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> IdentityRepositoryError {
    IdentityRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn store(&self, identity: &Identity) -> IdentityRepositoryResult<()> {
        let mut identities = self.state.write().map_err(poisoned)?;
        if identities.contains_key(identity.key()) {
            return Err(IdentityRepositoryError::DuplicateIdentity(
                identity.key().clone(),
            ));
        }
        identities.insert(identity.key().clone(), identity.clone());
        Ok(())
    }

    async fn update(&self, identity: &Identity) -> IdentityRepositoryResult<()> {
        let mut identities = self.state.write().map_err(poisoned)?;
        let stored = identities
            .get_mut(identity.key())
            .ok_or_else(|| IdentityRepositoryError::NotFound(identity.key().clone()))?;

        // Totals only move through `credit`; keep the stored values.
        let updated = Identity::from_persisted(PersistedIdentityData {
            key: identity.key().clone(),
            display_name: identity.display_name().to_owned(),
            role: identity.role(),
            points: stored.points(),
            balance_minor: stored.balance_minor(),
            payout_method: identity.payout_method(),
            payout_address: identity.payout_address().to_owned(),
            last_seen_at: identity.last_seen_at(),
        });
        *stored = updated;
        Ok(())
    }

    async fn find_by_key(&self, key: &IdentityKey) -> IdentityRepositoryResult<Option<Identity>> {
        let identities = self.state.read().map_err(poisoned)?;
        Ok(identities.get(key).cloned())
    }

    async fn credit(
        &self,
        key: &IdentityKey,
        points: u64,
        amount_minor: i64,
    ) -> IdentityRepositoryResult<Identity> {
        let mut identities = self.state.write().map_err(poisoned)?;
        let identity = identities
            .get_mut(key)
            .ok_or_else(|| IdentityRepositoryError::NotFound(key.clone()))?;
        identity
            .apply_credit(points, amount_minor)
            .map_err(|err| match err {
                IdentityDomainError::CreditOverflow(overflowed) => {
                    IdentityRepositoryError::CreditOverflow(overflowed)
                }
                other => IdentityRepositoryError::persistence(other),
            })?;
        Ok(identity.clone())
    }
}
