//! Error types for identity domain validation and parsing.

use super::IdentityKey;
use thiserror::Error;

/// Errors returned while constructing or mutating identities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The identity key is empty after trimming.
    #[error("identity key must not be empty")]
    EmptyIdentityKey,

    /// The identity key exceeds the storage limit.
    #[error("identity key exceeds {max} characters: {key}")]
    IdentityKeyTooLong {
        /// Rejected key.
        key: String,
        /// Maximum permitted length.
        max: usize,
    },

    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The payout address exceeds the storage limit.
    #[error("payout address exceeds {0} characters")]
    PayoutAddressTooLong(usize),

    /// The caller's role does not grant the required capability.
    #[error("{identity} lacks the {required} capability")]
    MissingCapability {
        /// Calling identity.
        identity: IdentityKey,
        /// Capability the action requires.
        required: &'static str,
    },

    /// Crediting would overflow the stored totals.
    #[error("credit overflows the totals of {0}")]
    CreditOverflow(IdentityKey),
}

/// Error returned while parsing roles from persistence or requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing payout methods.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown payout method: {0}")]
pub struct ParsePayoutMethodError(pub String);
