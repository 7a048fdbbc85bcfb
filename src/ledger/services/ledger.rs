//! Service layer for acceptance credits and the transaction record.

use crate::config::{ConfigError, ConfigSource, EngineConfig};
use crate::error::ErrorKind;
use crate::identity::{
    domain::{Identity, IdentityKey},
    ports::{IdentityRepository, IdentityRepositoryError},
};
use crate::ledger::{
    domain::{
        Credit, LedgerDomainError, LedgerEntry, TransactionId, TransactionKind, TransactionStatus,
    },
    ports::{TransactionRepository, TransactionRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for ledger operations.
#[derive(Debug, Error)]
pub enum LedgerServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] LedgerDomainError),
    /// The engine configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Identity persistence failed.
    #[error(transparent)]
    Identity(#[from] IdentityRepositoryError),
    /// Transaction persistence failed.
    #[error(transparent)]
    Repository(#[from] TransactionRepositoryError),
    /// The beneficiary is not registered.
    #[error("identity not found: {0}")]
    IdentityNotFound(IdentityKey),
    /// The transaction does not exist.
    #[error("transaction not found: {0}")]
    TransactionNotFound(TransactionId),
}

impl LedgerServiceError {
    /// Classifies the error for the request boundary.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(
                LedgerDomainError::NonPositiveAmount(_)
                | LedgerDomainError::InvalidAmount(_)
                | LedgerDomainError::ZeroRatePoints,
            ) => ErrorKind::Validation,
            Self::Domain(LedgerDomainError::InvalidSettlement { .. }) => {
                ErrorKind::InvalidTransition
            }
            Self::Identity(IdentityRepositoryError::NotFound(_))
            | Self::Repository(TransactionRepositoryError::NotFound(_))
            | Self::IdentityNotFound(_)
            | Self::TransactionNotFound(_) => ErrorKind::NotFound,
            Self::Repository(TransactionRepositoryError::DuplicateTransaction(_)) => {
                ErrorKind::Conflict
            }
            Self::Domain(LedgerDomainError::CreditOverflow { .. })
            | Self::Config(_)
            | Self::Identity(_)
            | Self::Repository(TransactionRepositoryError::Persistence(_)) => ErrorKind::Internal,
        }
    }
}

/// Result type for ledger service operations.
pub type LedgerServiceResult<T> = Result<T, LedgerServiceError>;

/// Reward crediting and transaction record service.
#[derive(Clone)]
pub struct LedgerService<X, I, C>
where
    X: TransactionRepository,
    I: IdentityRepository,
    C: Clock + Send + Sync,
{
    transactions: Arc<X>,
    identities: Arc<I>,
    config: Arc<dyn ConfigSource>,
    clock: Arc<C>,
}

impl<X, I, C> LedgerService<X, I, C>
where
    X: TransactionRepository,
    I: IdentityRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new ledger service.
    #[must_use]
    pub const fn new(
        transactions: Arc<X>,
        identities: Arc<I>,
        config: Arc<dyn ConfigSource>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            transactions,
            identities,
            config,
            clock,
        }
    }

    /// Converts the accepted task's points into balance and adds both to the
    /// beneficiary's totals. `points` overrides the configured award.
    ///
    /// Each call credits again; guarding against a repeated acceptance is up
    /// to the transition policy.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError`] when configuration cannot be read, the
    /// credit overflows, or the beneficiary is not registered.
    pub async fn credit_for_acceptance(
        &self,
        beneficiary: &IdentityKey,
        points: Option<u32>,
    ) -> LedgerServiceResult<Credit> {
        let config = self.config.current().await?;
        let credit = self.prepare_credit(beneficiary, points, &config).await?;
        self.apply_credit(&credit).await?;
        Ok(credit)
    }

    /// Computes the acceptance credit under `config` without writing it.
    ///
    /// The beneficiary must be registered and its totals must absorb the
    /// credit, so a prepared credit fails to apply only on a concurrent
    /// change or a storage fault.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::IdentityNotFound`] for an unregistered
    /// beneficiary, or an overflow error when the conversion or the totals
    /// would overflow.
    pub async fn prepare_credit(
        &self,
        beneficiary: &IdentityKey,
        points: Option<u32>,
        config: &EngineConfig,
    ) -> LedgerServiceResult<Credit> {
        let awarded = points.unwrap_or(config.points_per_task());
        let amount_minor = config.rate().credit_for(awarded)?;
        let mut identity = self.registered(beneficiary).await?;
        identity
            .apply_credit(u64::from(awarded), amount_minor)
            .map_err(|_| IdentityRepositoryError::CreditOverflow(beneficiary.clone()))?;
        Ok(Credit::new(beneficiary.clone(), awarded, amount_minor))
    }

    /// Adds a prepared credit to the beneficiary's totals.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Identity`] when the beneficiary vanished,
    /// the totals overflow, or storage fails.
    pub async fn apply_credit(&self, credit: &Credit) -> LedgerServiceResult<()> {
        let beneficiary = credit.beneficiary();
        let credited = self
            .identities
            .credit(
                beneficiary,
                u64::from(credit.points()),
                credit.amount_minor(),
            )
            .await?;
        info!(
            identity = %beneficiary,
            points = credit.points(),
            amount_minor = credit.amount_minor(),
            total_points = credited.points(),
            balance_minor = credited.balance_minor(),
            "acceptance credited"
        );
        Ok(())
    }

    /// Appends a pending payout entry for the beneficiary.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::IdentityNotFound`] for an unknown
    /// beneficiary or a domain error for a non-positive amount.
    pub async fn request_payout(
        &self,
        beneficiary: &IdentityKey,
        amount_minor: i64,
    ) -> LedgerServiceResult<LedgerEntry> {
        self.append(beneficiary, amount_minor, TransactionKind::Payout)
            .await
    }

    /// Appends a pending bonus entry for the beneficiary.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::IdentityNotFound`] for an unknown
    /// beneficiary or a domain error for a non-positive amount.
    pub async fn record_bonus(
        &self,
        beneficiary: &IdentityKey,
        amount_minor: i64,
    ) -> LedgerServiceResult<LedgerEntry> {
        self.append(beneficiary, amount_minor, TransactionKind::Bonus)
            .await
    }

    /// Settles a pending entry as paid or canceled.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::TransactionNotFound`] for an unknown
    /// entry or a domain error when the entry is already settled.
    pub async fn settle(
        &self,
        id: TransactionId,
        status: TransactionStatus,
    ) -> LedgerServiceResult<LedgerEntry> {
        let mut entry = self
            .transactions
            .find_by_id(id)
            .await?
            .ok_or(LedgerServiceError::TransactionNotFound(id))?;
        entry.settle(status)?;
        self.transactions.update_status(&entry).await?;
        info!(transaction = %id, status = status.as_str(), "transaction settled");
        Ok(entry)
    }

    /// Lists the beneficiary's entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerServiceError::Repository`] when the lookup fails.
    pub async fn transactions_for(
        &self,
        beneficiary: &IdentityKey,
    ) -> LedgerServiceResult<Vec<LedgerEntry>> {
        Ok(self.transactions.list_for_beneficiary(beneficiary).await?)
    }

    async fn append(
        &self,
        beneficiary: &IdentityKey,
        amount_minor: i64,
        kind: TransactionKind,
    ) -> LedgerServiceResult<LedgerEntry> {
        self.registered(beneficiary).await?;
        let entry = LedgerEntry::new(beneficiary.clone(), amount_minor, kind, &*self.clock)?;
        self.transactions.append(&entry).await?;
        info!(
            identity = %beneficiary,
            transaction = %entry.id(),
            kind = kind.as_str(),
            amount_minor,
            "ledger entry appended"
        );
        Ok(entry)
    }

    async fn registered(&self, beneficiary: &IdentityKey) -> LedgerServiceResult<Identity> {
        self.identities
            .find_by_key(beneficiary)
            .await?
            .ok_or_else(|| LedgerServiceError::IdentityNotFound(beneficiary.clone()))
    }
}
