//! Error types for ledger domain validation and parsing.

use super::{TransactionId, TransactionStatus};
use thiserror::Error;

/// Errors returned while constructing ledger values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerDomainError {
    /// The conversion rate divides by zero points.
    #[error("conversion rate must cover at least one point")]
    ZeroRatePoints,

    /// A currency amount could not be parsed as a decimal with at most two
    /// fractional digits.
    #[error("invalid currency amount '{0}', expected a decimal like 0.5")]
    InvalidAmount(String),

    /// The computed credit does not fit the balance type.
    #[error("credit for {points} points overflows the balance")]
    CreditOverflow {
        /// Points being converted.
        points: u32,
    },

    /// Payout and bonus entries must move a positive amount.
    #[error("ledger amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    /// Settlement may only move a pending entry to paid or canceled.
    #[error("transaction {id} cannot move from {from} to {to}")]
    InvalidSettlement {
        /// Entry identifier.
        id: TransactionId,
        /// Current status.
        from: TransactionStatus,
        /// Requested status.
        to: TransactionStatus,
    },
}

/// Error returned while parsing transaction kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transaction kind: {0}")]
pub struct ParseTransactionKindError(pub String);

/// Error returned while parsing transaction statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown transaction status: {0}")]
pub struct ParseTransactionStatusError(pub String);
