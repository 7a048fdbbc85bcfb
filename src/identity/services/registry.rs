//! Service layer for identity registration and self-service profile updates.

use crate::error::ErrorKind;
use crate::identity::{
    domain::{
        Identity, IdentityDomainError, IdentityKey, ParsePayoutMethodError, PayoutMethod, Role,
    },
    ports::{IdentityRepository, IdentityRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering (or re-seeing) an identity at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterIdentityRequest {
    key: String,
    display_name: String,
    role: Role,
}

impl RegisterIdentityRequest {
    /// Creates a request for a new `member` identity.
    #[must_use]
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            role: Role::Member,
        }
    }

    /// Sets the role granted when the identity is first created.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// The payout method is not recognised.
    #[error(transparent)]
    PayoutMethod(#[from] ParsePayoutMethodError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
    /// The identity does not exist.
    #[error("identity not found: {0}")]
    NotFound(IdentityKey),
}

impl IdentityServiceError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(IdentityDomainError::MissingCapability { .. }) => ErrorKind::Unauthorized,
            Self::Domain(IdentityDomainError::CreditOverflow(_))
            | Self::Repository(
                IdentityRepositoryError::CreditOverflow(_)
                | IdentityRepositoryError::Persistence(_),
            ) => ErrorKind::Internal,
            Self::Domain(_) | Self::PayoutMethod(_) => ErrorKind::Validation,
            Self::Repository(IdentityRepositoryError::DuplicateIdentity(_)) => ErrorKind::Conflict,
            Self::Repository(IdentityRepositoryError::NotFound(_)) | Self::NotFound(_) => {
                ErrorKind::NotFound
            }
        }
    }
}

/// Result type for identity service operations.
pub type IdentityServiceResult<T> = Result<T, IdentityServiceError>;

/// Identity registration and profile service.
#[derive(Clone)]
pub struct IdentityService<R, C>
where
    R: IdentityRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> IdentityService<R, C>
where
    R: IdentityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new identity service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates the identity on first sight, otherwise refreshes its
    /// last-seen time. The requested role only applies on creation.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError`] when the key or display name is
    /// invalid or persistence fails.
    pub async fn register_or_touch(
        &self,
        request: RegisterIdentityRequest,
    ) -> IdentityServiceResult<Identity> {
        let RegisterIdentityRequest {
            key,
            display_name,
            role,
        } = request;
        let identity_key = IdentityKey::new(key)?;

        if let Some(mut existing) = self.repository.find_by_key(&identity_key).await? {
            existing.record_seen(&*self.clock);
            self.repository.update(&existing).await?;
            return Ok(existing);
        }

        let identity = Identity::new(identity_key, display_name, role, &*self.clock)?;
        self.repository.store(&identity).await?;
        info!(identity = %identity.key(), role = identity.role().as_str(), "identity registered");
        Ok(identity)
    }

    /// Retrieves an identity by key.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::NotFound`] when the identity does not
    /// exist.
    pub async fn get(&self, key: &IdentityKey) -> IdentityServiceResult<Identity> {
        self.repository
            .find_by_key(key)
            .await?
            .ok_or_else(|| IdentityServiceError::NotFound(key.clone()))
    }

    /// Updates the caller's payout method and address.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::PayoutMethod`] for an unknown method,
    /// [`IdentityServiceError::NotFound`] when the identity is missing, or a
    /// domain error when the address is too long.
    pub async fn set_payout_method(
        &self,
        key: &IdentityKey,
        method: &str,
        address: Option<String>,
    ) -> IdentityServiceResult<Identity> {
        let payout_method = PayoutMethod::try_from(method)?;
        let mut identity = self.get(key).await?;
        identity.set_payout(payout_method, address)?;
        self.repository.update(&identity).await?;
        Ok(identity)
    }

    /// Changes an identity's role.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::NotFound`] when the identity is
    /// missing or a repository error when persistence fails.
    pub async fn set_role(&self, key: &IdentityKey, role: Role) -> IdentityServiceResult<Identity> {
        let mut identity = self.get(key).await?;
        identity.set_role(role);
        self.repository.update(&identity).await?;
        info!(identity = %key, role = role.as_str(), "identity role changed");
        Ok(identity)
    }
}
