//! Ledger entries and acceptance credits.

use super::{LedgerDomainError, ParseTransactionKindError, ParseTransactionStatusError};
use crate::identity::domain::IdentityKey;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random transaction identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a transaction identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reason money moves for an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Withdrawal of accumulated balance.
    Payout,
    /// Discretionary award on top of task credits.
    Bonus,
}

impl TransactionKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payout => "payout",
            Self::Bonus => "bonus",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = ParseTransactionKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "payout" => Ok(Self::Payout),
            "bonus" => Ok(Self::Bonus),
            _ => Err(ParseTransactionKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement state of a ledger entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Awaiting the payout process.
    #[default]
    Pending,
    /// Settled.
    Paid,
    /// Abandoned before settlement.
    Canceled,
}

impl TransactionStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Canceled => "canceled",
        }
    }
}

impl TryFrom<&str> for TransactionStatus {
    type Error = ParseTransactionStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "canceled" => Ok(Self::Canceled),
            _ => Err(ParseTransactionStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append-only record of money owed to or paid out to an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    id: TransactionId,
    beneficiary: IdentityKey,
    amount_minor: i64,
    kind: TransactionKind,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedLedgerEntryData {
    /// Persisted entry identifier.
    pub id: TransactionId,
    /// Persisted beneficiary.
    pub beneficiary: IdentityKey,
    /// Persisted amount in minor currency units.
    pub amount_minor: i64,
    /// Persisted kind.
    pub kind: TransactionKind,
    /// Persisted settlement status.
    pub status: TransactionStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Creates a pending entry.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::NonPositiveAmount`] when `amount_minor`
    /// is zero or negative.
    pub fn new(
        beneficiary: IdentityKey,
        amount_minor: i64,
        kind: TransactionKind,
        clock: &impl Clock,
    ) -> Result<Self, LedgerDomainError> {
        if amount_minor <= 0 {
            return Err(LedgerDomainError::NonPositiveAmount(amount_minor));
        }
        Ok(Self {
            id: TransactionId::new(),
            beneficiary,
            amount_minor,
            kind,
            status: TransactionStatus::Pending,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedLedgerEntryData) -> Self {
        Self {
            id: data.id,
            beneficiary: data.beneficiary,
            amount_minor: data.amount_minor,
            kind: data.kind,
            status: data.status,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> TransactionId {
        self.id
    }

    /// Returns the beneficiary identity.
    #[must_use]
    pub const fn beneficiary(&self) -> &IdentityKey {
        &self.beneficiary
    }

    /// Returns the amount in minor currency units.
    #[must_use]
    pub const fn amount_minor(&self) -> i64 {
        self.amount_minor
    }

    /// Returns the entry kind.
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Returns the settlement status.
    #[must_use]
    pub const fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Returns when the entry was appended.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Settles a pending entry as paid or canceled.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerDomainError::InvalidSettlement`] unless the entry is
    /// pending and `status` is paid or canceled.
    pub fn settle(&mut self, status: TransactionStatus) -> Result<(), LedgerDomainError> {
        if self.status != TransactionStatus::Pending || status == TransactionStatus::Pending {
            return Err(LedgerDomainError::InvalidSettlement {
                id: self.id,
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        Ok(())
    }
}

/// Points and balance credited to an identity when a task is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    beneficiary: IdentityKey,
    points: u32,
    amount_minor: i64,
}

impl Credit {
    /// Creates a credit record.
    #[must_use]
    pub const fn new(beneficiary: IdentityKey, points: u32, amount_minor: i64) -> Self {
        Self {
            beneficiary,
            points,
            amount_minor,
        }
    }

    /// Returns the credited identity.
    #[must_use]
    pub const fn beneficiary(&self) -> &IdentityKey {
        &self.beneficiary
    }

    /// Returns the points awarded.
    #[must_use]
    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Returns the balance awarded in minor currency units.
    #[must_use]
    pub const fn amount_minor(&self) -> i64 {
        self.amount_minor
    }
}
